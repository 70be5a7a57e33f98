use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use dashmap::DashMap;

use metricreg_core::error::{MetricsError, Result};
use metricreg_core::{Category, Counter};

use super::snapshot::{CounterInfo, RegistrySnapshot};

/// Default upper bound on registry/metric name length (in chars).
pub const DEFAULT_MAX_NAME_LEN: usize = 256;

/// Limits enforced on every get-or-create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerLimits {
    pub max_name_len: usize,
    /// 0 => unlimited.
    pub max_counters_per_registry: usize,
}

impl Default for ManagerLimits {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_counters_per_registry: 0,
        }
    }
}

struct CounterEntry {
    counter: Arc<Counter>,
    category: Option<Category>,
    scope: Option<String>,
}

impl CounterEntry {
    fn info(&self) -> CounterInfo {
        CounterInfo {
            value: self.counter.get(),
            category: self.category,
            scope: self.scope.clone(),
        }
    }
}

/// Counters of one registry name. `len` tracks reservations so capacity can
/// be checked without taking a second lock on `counters`.
#[derive(Default)]
struct NamedRegistry {
    counters: DashMap<String, CounterEntry>,
    len: AtomicUsize,
}

/// Metric manager:
/// - `registry_name -> metric_name -> Counter`
///
/// Identity is `(registry, metric)`. Category and scope are recorded from the
/// creating call and never rewritten.
#[derive(Default)]
pub struct MetricManager {
    registries: DashMap<String, NamedRegistry>,
    limits: ManagerLimits,
}

impl MetricManager {
    pub fn new() -> Self {
        Self::with_limits(ManagerLimits::default())
    }

    pub fn with_limits(limits: ManagerLimits) -> Self {
        Self {
            registries: DashMap::new(),
            limits,
        }
    }

    pub fn limits(&self) -> ManagerLimits {
        self.limits
    }

    /// Return the counter registered under `(registry, metric)`, creating it at
    /// zero if absent. Repeat calls return the same `Arc` whatever `category`
    /// and `scope` say.
    pub fn get_or_create_counter(
        &self,
        registry: &str,
        metric: &str,
        category: Option<Category>,
        scope: Option<&str>,
    ) -> Result<Arc<Counter>> {
        self.validate_registry_name(registry)?;
        self.validate_name("metric", metric)?;

        let reg = self.named_or_insert(registry);
        let entry = reg.counters.entry(metric.to_owned());
        match entry {
            Entry::Occupied(e) => Ok(Arc::clone(&e.get().counter)),
            Entry::Vacant(v) => {
                self.reserve_slot(registry, &reg.len)?;

                let scope = scope.filter(|s| !s.is_empty()).map(str::to_owned);
                tracing::debug!(
                    registry = %registry,
                    metric = %metric,
                    category = ?category,
                    scope = ?scope,
                    "counter created"
                );

                let counter = Arc::new(Counter::new());
                v.insert(CounterEntry {
                    counter: Arc::clone(&counter),
                    category,
                    scope,
                });
                Ok(counter)
            }
        }
    }

    /// Lookup without creating.
    pub fn counter(&self, registry: &str, metric: &str) -> Option<Arc<Counter>> {
        let reg = self.registries.get(registry)?;
        let c = reg.counters.get(metric).map(|e| Arc::clone(&e.counter));
        c
    }

    pub fn counter_info(&self, registry: &str, metric: &str) -> Option<CounterInfo> {
        let reg = self.registries.get(registry)?;
        let info = reg.counters.get(metric).map(|e| e.info());
        info
    }

    /// All counters of one registry, ordered by metric name.
    pub fn counters(&self, registry: &str) -> BTreeMap<String, Arc<Counter>> {
        let Some(reg) = self.registries.get(registry) else {
            return BTreeMap::new();
        };
        let counters = reg
            .counters
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(&e.value().counter)))
            .collect();
        counters
    }

    pub fn registry_names(&self) -> BTreeSet<String> {
        self.registries.iter().map(|r| r.key().clone()).collect()
    }

    pub fn has_registry(&self, registry: &str) -> bool {
        self.registries.contains_key(registry)
    }

    pub fn counter_count(&self, registry: &str) -> usize {
        self.registries
            .get(registry)
            .map(|r| r.counters.len())
            .unwrap_or(0)
    }

    pub fn total_counters(&self) -> usize {
        self.registries.iter().map(|r| r.counters.len()).sum()
    }

    /// Drop a registry and every counter in it.
    pub fn remove_registry(&self, registry: &str) -> bool {
        let removed = self.registries.remove(registry).is_some();
        if removed {
            tracing::debug!(registry = %registry, "registry removed");
        }
        removed
    }

    /// Remove every counter of a registry but keep the name known.
    /// Returns the number of counters removed.
    pub fn clear_registry(&self, registry: &str) -> usize {
        let Some(reg) = self.registries.get(registry) else {
            return 0;
        };
        let mut removed = 0usize;
        reg.counters.retain(|_, _| {
            removed += 1;
            false
        });
        reg.len.fetch_sub(removed, Ordering::AcqRel);
        tracing::debug!(registry = %registry, removed, "registry cleared");
        removed
    }

    /// Drop all registries.
    pub fn clear(&self) {
        self.registries.clear();
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let registries = self
            .registries
            .iter()
            .map(|r| {
                let counters: BTreeMap<String, CounterInfo> = r
                    .value()
                    .counters
                    .iter()
                    .map(|e| (e.key().clone(), e.value().info()))
                    .collect();
                (r.key().clone(), counters)
            })
            .collect();
        RegistrySnapshot { registries }
    }

    /// Fast path is a shared read; the write lock on the outer map is only
    /// taken the first time a registry name is seen.
    fn named_or_insert(&self, registry: &str) -> Ref<'_, String, NamedRegistry> {
        if let Some(reg) = self.registries.get(registry) {
            return reg;
        }
        self.registries
            .entry(registry.to_owned())
            .or_default()
            .downgrade()
    }

    fn reserve_slot(&self, registry: &str, len: &AtomicUsize) -> Result<()> {
        let max = self.limits.max_counters_per_registry;
        let reserved = len.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
            if max > 0 && n >= max {
                None
            } else {
                Some(n + 1)
            }
        });
        if reserved.is_err() {
            tracing::warn!(registry = %registry, max, "registry full, counter not created");
            return Err(MetricsError::CapacityExceeded(format!(
                "registry {registry} holds the maximum of {max} counters"
            )));
        }
        Ok(())
    }

    /// Check a registry name against the same rules get-or-create applies.
    pub fn validate_registry_name(&self, registry: &str) -> Result<()> {
        self.validate_name("registry", registry)
    }

    fn validate_name(&self, kind: &str, name: &str) -> Result<()> {
        let problem = if name.is_empty() {
            Some("must not be empty")
        } else if name.chars().count() > self.limits.max_name_len {
            Some("is too long")
        } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("must not contain whitespace or control characters")
        } else {
            None
        };

        match problem {
            None => Ok(()),
            Some(p) => {
                tracing::warn!(kind, name = %name.escape_debug(), "rejected metric identifier");
                Err(MetricsError::InvalidName(format!("{kind} name {p}: {name:?}")))
            }
        }
    }
}
