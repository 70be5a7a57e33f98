//! Metrics config loader (strict parsing).

pub mod schema;

use std::fs;
use std::sync::Arc;

use metricreg_core::error::{MetricsError, Result};
use metricreg_core::Counter;

use crate::producer::StaticProducer;

pub use schema::{LimitsSection, MetricsConfig, ProducerConfig, RegistryConfig};

pub fn load_from_file(path: &str) -> Result<MetricsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MetricsConfig> {
    let cfg: MetricsConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

impl ProducerConfig {
    /// Build the producer this entry declares. Every metric starts at zero.
    pub fn to_producer(&self) -> StaticProducer {
        let mut b = StaticProducer::builder()
            .name(self.name.as_str())
            .category(self.category);
        if let Some(v) = &self.version {
            b = b.version(v.as_str());
        }
        if let Some(d) = &self.description {
            b = b.description(d.as_str());
        }
        if let Some(s) = &self.scope {
            b = b.scope(s.as_str());
        }
        if let Some(s) = &self.source {
            b = b.source(s.as_str());
        }
        for url in &self.docs {
            b = b.doc(url.clone());
        }
        for m in &self.metrics {
            b = b.metric(m.as_str(), Arc::new(Counter::new()));
        }
        b.build()
    }
}
