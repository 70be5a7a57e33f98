use std::collections::BTreeMap;

use serde::Serialize;

use metricreg_core::Category;

/// Point-in-time view of one registered counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterInfo {
    pub value: i64,
    /// Category passed by the call that created the counter.
    pub category: Option<Category>,
    /// Scope passed by the call that created the counter.
    pub scope: Option<String>,
}

/// Point-in-time view of every registry, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistrySnapshot {
    pub registries: BTreeMap<String, BTreeMap<String, CounterInfo>>,
}

impl RegistrySnapshot {
    pub fn get(&self, registry: &str, metric: &str) -> Option<&CounterInfo> {
        self.registries.get(registry)?.get(metric)
    }

    pub fn total_counters(&self) -> usize {
        self.registries.values().map(BTreeMap::len).sum()
    }
}
