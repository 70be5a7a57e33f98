//! Producers bound to one registry name.
//!
//! A `ScopedRegistry` plays the part of a per-component metric manager: it
//! owns a registry name, registers producers under scopes, and remembers
//! which producer published which metric names.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;

use metricreg_core::error::Result;
use metricreg_core::Category;

use crate::producer::MetricProducer;
use crate::registry::MetricManager;

/// What a registered producer published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerRecord {
    pub name: String,
    pub version: String,
    pub category: Option<Category>,
    pub scope: Option<String>,
    pub metric_names: BTreeSet<String>,
}

pub struct ScopedRegistry {
    manager: Arc<MetricManager>,
    registry: String,
    producers: DashMap<String, ProducerRecord>,
}

impl ScopedRegistry {
    pub fn new(manager: Arc<MetricManager>, registry: impl Into<String>) -> Result<Self> {
        let registry = registry.into();
        manager.validate_registry_name(&registry)?;
        Ok(Self {
            manager,
            registry,
            producers: DashMap::new(),
        })
    }

    pub fn registry_name(&self) -> &str {
        &self.registry
    }

    pub fn manager(&self) -> Arc<MetricManager> {
        Arc::clone(&self.manager)
    }

    /// Initialize `producer`'s metrics under `scope` and record the result.
    /// The record is keyed by `scope`, or by the producer name when no scope
    /// is given; a later registration under the same key replaces it.
    pub fn register_producer(
        &self,
        scope: Option<&str>,
        producer: &dyn MetricProducer,
    ) -> Result<BTreeSet<String>> {
        let scope = scope.filter(|s| !s.is_empty());
        let metric_names = producer.initialize_metrics(&self.manager, &self.registry, scope)?;

        let key = scope.unwrap_or(producer.name()).to_owned();
        tracing::info!(
            registry = %self.registry,
            producer = %producer.name(),
            key = %key,
            metrics = metric_names.len(),
            "producer registered"
        );

        let record = ProducerRecord {
            name: producer.name().to_owned(),
            version: producer.version().to_owned(),
            category: producer.category(),
            scope: scope.map(str::to_owned),
            metric_names: metric_names.clone(),
        };
        if let Some(prev) = self.producers.insert(key.clone(), record) {
            tracing::warn!(
                registry = %self.registry,
                key = %key,
                previous = %prev.name,
                "producer record replaced"
            );
        }
        Ok(metric_names)
    }

    pub fn producer(&self, key: &str) -> Option<ProducerRecord> {
        self.producers.get(key).map(|r| r.value().clone())
    }

    /// Registered producers ordered by key.
    pub fn registered_producers(&self) -> Vec<(String, ProducerRecord)> {
        let mut out: Vec<(String, ProducerRecord)> = self
            .producers
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Forget a producer. Its counters stay in the registry.
    pub fn unregister(&self, key: &str) -> Option<ProducerRecord> {
        self.producers.remove(key).map(|(_, r)| r)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use metricreg_core::Counter;

    use super::*;
    use crate::producer::StaticProducer;
    use crate::registry::ManagerLimits;

    fn producer(scope: &str, names: &[&str]) -> StaticProducer {
        let metrics: BTreeMap<String, Arc<Counter>> = names
            .iter()
            .map(|n| (n.to_string(), Arc::new(Counter::new())))
            .collect();
        StaticProducer::of(Some(Category::Update), Some(scope), Some(metrics))
    }

    #[test]
    fn rejects_bad_registry_name() {
        let m = Arc::new(MetricManager::new());
        assert!(ScopedRegistry::new(Arc::clone(&m), "").is_err());
        assert!(ScopedRegistry::new(Arc::clone(&m), "core 1").is_err());

        let long = "c".repeat(300);
        let err = ScopedRegistry::new(m, long).err().unwrap();
        assert_eq!(err.code().as_str(), "INVALID_NAME");
    }

    #[test]
    fn registry_name_follows_manager_limits() {
        let m = Arc::new(MetricManager::with_limits(ManagerLimits {
            max_name_len: 5,
            ..ManagerLimits::default()
        }));
        assert!(ScopedRegistry::new(Arc::clone(&m), "core1").is_ok());
        assert!(ScopedRegistry::new(m, "core12").is_err());
    }

    #[test]
    fn same_key_replaces_record() {
        let m = Arc::new(MetricManager::new());
        let scoped = ScopedRegistry::new(Arc::clone(&m), "core1").unwrap();

        scoped
            .register_producer(Some("h"), &producer("first", &["adds"]))
            .unwrap();
        scoped
            .register_producer(Some("h"), &producer("second", &["opens"]))
            .unwrap();

        let all = scoped.registered_producers();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].1.name, "second");
        // counters of the replaced producer stay
        assert_eq!(m.counter_count("core1"), 2);
    }

    #[test]
    fn records_producers_by_scope() {
        let m = Arc::new(MetricManager::new());
        let scoped = ScopedRegistry::new(Arc::clone(&m), "core1").unwrap();

        scoped
            .register_producer(
                Some("updateHandler"),
                &producer("updateHandler", &["adds", "deletes"]),
            )
            .unwrap();
        scoped
            .register_producer(None, &producer("searcher", &["opens"]))
            .unwrap();

        let all = scoped.registered_producers();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "searcher");
        assert_eq!(all[0].1.scope, None);
        assert_eq!(all[1].0, "updateHandler");
        assert_eq!(all[1].1.category, Some(Category::Update));

        assert_eq!(m.counter_count("core1"), 3);
        assert_eq!(
            m.counter_info("core1", "adds").unwrap().scope.as_deref(),
            Some("updateHandler")
        );

        let rec = scoped.unregister("searcher").unwrap();
        assert!(rec.metric_names.contains("opens"));
        assert!(scoped.producer("searcher").is_none());
        assert!(m.counter("core1", "opens").is_some());
    }

    #[test]
    fn failed_registration_is_not_recorded() {
        let m = Arc::new(MetricManager::new());
        let scoped = ScopedRegistry::new(m, "core1").unwrap();
        let err = scoped
            .register_producer(Some("h"), &producer("h", &["bad\tname"]))
            .unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_NAME");
        assert!(scoped.registered_producers().is_empty());
    }
}
