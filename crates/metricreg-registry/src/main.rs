//! metricreg seeder
//!
//! - Loads a strict YAML config (first CLI argument, default `metricreg.yaml`)
//! - Registers every configured producer into its registry
//! - Prints the resulting registry snapshot as JSON

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use metricreg_core::error::{MetricsError, Result};
use metricreg_registry::{config, MetricManager, ScopedRegistry};

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "metricreg failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "metricreg.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let manager = Arc::new(MetricManager::with_limits(cfg.limits.into()));
    for reg in &cfg.registries {
        let scoped = ScopedRegistry::new(Arc::clone(&manager), reg.name.as_str())?;
        for p in &reg.producers {
            let producer = p.to_producer();
            scoped.register_producer(p.scope.as_deref(), &producer)?;
        }
        tracing::info!(
            registry = %reg.name,
            producers = reg.producers.len(),
            counters = manager.counter_count(&reg.name),
            "registry seeded"
        );
    }

    let out = serde_json::to_string_pretty(&manager.snapshot())
        .map_err(|e| MetricsError::Internal(format!("json encode failed: {e}")))?;
    println!("{out}");
    Ok(())
}
