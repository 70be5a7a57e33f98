use std::collections::BTreeSet;

use url::Url;

use metricreg_core::error::Result;
use metricreg_core::{Category, Statistics};

use crate::registry::MetricManager;

/// Anything that describes itself and can publish counters into a registry.
///
/// Optional attributes are `None` when they do not apply; `docs` is always
/// present and may be empty.
pub trait MetricProducer: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> Option<Category>;
    fn source(&self) -> Option<&str>;
    fn docs(&self) -> &[Url];
    fn statistics(&self) -> Option<Statistics>;

    /// Get-or-create one counter per declared metric in `registry`, tagged
    /// with this producer's category and `scope`. Returns the declared metric
    /// names. Safe to call repeatedly; registry errors are returned as is.
    fn initialize_metrics(
        &self,
        manager: &MetricManager,
        registry: &str,
        scope: Option<&str>,
    ) -> Result<BTreeSet<String>>;
}
