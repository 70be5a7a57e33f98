use std::collections::HashSet;

use serde::Deserialize;

use metricreg_core::error::{MetricsError, Result};
use metricreg_core::Category;

use crate::registry::{ManagerLimits, DEFAULT_MAX_NAME_LEN};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub limits: LimitsSection,

    #[serde(default)]
    pub registries: Vec<RegistryConfig>,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }

        self.limits.validate()?;

        let mut seen = HashSet::new();
        for r in &self.registries {
            r.validate()?;
            if !seen.insert(r.name.as_str()) {
                return Err(MetricsError::BadConfig(format!(
                    "duplicate registry name: {}",
                    r.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// 0 => unlimited.
    #[serde(default)]
    pub max_counters_per_registry: usize,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            max_counters_per_registry: 0,
        }
    }
}

impl LimitsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=4096).contains(&self.max_name_len) {
            return Err(MetricsError::BadConfig(
                "limits.max_name_len must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

impl From<LimitsSection> for ManagerLimits {
    fn from(l: LimitsSection) -> Self {
        ManagerLimits {
            max_name_len: l.max_name_len,
            max_counters_per_registry: l.max_counters_per_registry,
        }
    }
}

fn default_max_name_len() -> usize {
    DEFAULT_MAX_NAME_LEN
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub name: String,
    #[serde(default)]
    pub producers: Vec<ProducerConfig>,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MetricsError::BadConfig("registry name must not be empty".into()));
        }
        let mut keys = HashSet::new();
        for p in &self.producers {
            if p.name.trim().is_empty() {
                return Err(MetricsError::BadConfig(format!(
                    "producer name must not be empty (registry={})",
                    self.name
                )));
            }
            if !keys.insert(p.key()) {
                return Err(MetricsError::BadConfig(format!(
                    "duplicate producer key {:?} in registry {}",
                    p.key(),
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProducerConfig {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub docs: Vec<url::Url>,
    #[serde(default)]
    pub metrics: Vec<String>,
}

impl ProducerConfig {
    /// Key the producer is recorded under: its scope, else its name.
    pub fn key(&self) -> &str {
        self.scope
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}
