//! Process-wide counter registry.
//!
//! `MetricManager` owns every counter handed out to producers. It is built
//! once at startup, shared by `Arc`, and cleared explicitly for test
//! isolation.

pub mod manager;
pub mod snapshot;

pub use manager::{ManagerLimits, MetricManager, DEFAULT_MAX_NAME_LEN};
pub use snapshot::{CounterInfo, RegistrySnapshot};
