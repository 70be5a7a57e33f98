//! Producer capability and its fixed-attribute implementation.
//!
//! Re-exports the trait and `StaticProducer` so downstream consumers can
//! depend on this module directly.

pub mod capability;
pub mod fixed;

pub use capability::MetricProducer;
pub use fixed::{StaticProducer, StaticProducerBuilder};
