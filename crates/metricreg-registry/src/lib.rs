//! metricreg registry library entry.
//!
//! This crate wires the counter registry, the producer capability, scoped
//! producer bindings and config loading into one stack. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod config;
pub mod producer;
pub mod registry;
pub mod scoped;

#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;

pub use producer::{MetricProducer, StaticProducer};
pub use registry::{CounterInfo, ManagerLimits, MetricManager, RegistrySnapshot};
pub use scoped::{ProducerRecord, ScopedRegistry};
