use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use url::Url;

use metricreg_core::error::Result;
use metricreg_core::{Category, Counter, Statistics};

use crate::producer::MetricProducer;
use crate::registry::MetricManager;

const DEFAULT_NAME: &str = "unnamed";
const DEFAULT_VERSION: &str = "0.0";
const DEFAULT_DESCRIPTION: &str = "foo";

/// Producer whose attributes and metric set are fixed at construction.
#[derive(Debug, Clone)]
pub struct StaticProducer {
    name: String,
    version: String,
    description: String,
    category: Option<Category>,
    scope: Option<String>,
    source: Option<String>,
    docs: Vec<Url>,
    statistics: Option<Statistics>,
    metrics: Option<BTreeMap<String, Arc<Counter>>>,
}

impl StaticProducer {
    pub fn builder() -> StaticProducerBuilder {
        StaticProducerBuilder::default()
    }

    /// Producer named after its scope, with default version/description.
    pub fn of(
        category: Option<Category>,
        scope: Option<&str>,
        metrics: Option<BTreeMap<String, Arc<Counter>>>,
    ) -> Self {
        let mut b = Self::builder().category(category).metrics(metrics);
        if let Some(scope) = scope {
            b = b.name(scope).scope(scope);
        }
        b.build()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Declared metrics; `None` when the producer declares no metric set.
    pub fn metrics(&self) -> Option<&BTreeMap<String, Arc<Counter>>> {
        self.metrics.as_ref()
    }
}

impl MetricProducer for StaticProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<Category> {
        self.category
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn docs(&self) -> &[Url] {
        &self.docs
    }

    fn statistics(&self) -> Option<Statistics> {
        self.statistics.clone()
    }

    fn initialize_metrics(
        &self,
        manager: &MetricManager,
        registry: &str,
        scope: Option<&str>,
    ) -> Result<BTreeSet<String>> {
        let Some(metrics) = self.metrics.as_ref().filter(|m| !m.is_empty()) else {
            return Ok(BTreeSet::new());
        };

        for name in metrics.keys() {
            manager.get_or_create_counter(registry, name, self.category, scope)?;
        }
        tracing::debug!(
            producer = %self.name,
            registry = %registry,
            scope = ?scope,
            metrics = metrics.len(),
            "producer metrics initialized"
        );
        Ok(metrics.keys().cloned().collect())
    }
}

impl fmt::Display for StaticProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StaticProducer.of{{")?;
        match self.category {
            Some(c) => writeln!(f, "category={c}")?,
            None => writeln!(f, "category=none")?,
        }
        writeln!(f, "scope={}", self.scope.as_deref().unwrap_or("none"))?;
        match &self.metrics {
            Some(m) => {
                let parts: Vec<String> =
                    m.iter().map(|(k, c)| format!("{k}={}", c.get())).collect();
                writeln!(f, "metrics={{{}}}", parts.join(", "))?;
            }
            None => writeln!(f, "metrics=none")?,
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticProducerBuilder {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    category: Option<Category>,
    scope: Option<String>,
    source: Option<String>,
    docs: Vec<Url>,
    statistics: Option<Statistics>,
    metrics: Option<BTreeMap<String, Arc<Counter>>>,
}

impl StaticProducerBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn doc(mut self, url: Url) -> Self {
        self.docs.push(url);
        self
    }

    pub fn statistics(mut self, statistics: Option<Statistics>) -> Self {
        self.statistics = statistics;
        self
    }

    /// Replace the whole metric set (`None` => no metric set declared).
    pub fn metrics(mut self, metrics: Option<BTreeMap<String, Arc<Counter>>>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Declare one metric, creating the metric set if needed.
    pub fn metric(mut self, name: impl Into<String>, counter: Arc<Counter>) -> Self {
        self.metrics
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), counter);
        self
    }

    pub fn build(self) -> StaticProducer {
        StaticProducer {
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_owned()),
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.to_owned()),
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned()),
            category: self.category,
            scope: self.scope,
            source: self.source,
            docs: self.docs,
            statistics: self.statistics,
            metrics: self.metrics,
        }
    }
}
