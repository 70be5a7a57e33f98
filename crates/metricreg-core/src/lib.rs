//! metricreg core: counter primitives, producer categories, statistics reports
//! and the error surface shared by the registry and its producers.
//!
//! This crate carries no concurrency-map or config dependencies so it can be
//! reused by any component that wants to describe or publish metrics.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod category;
pub mod counter;
pub mod error;
pub mod stats;

pub use category::Category;
pub use counter::Counter;
/// Shared result type.
pub use error::{MetricsError, Result};
pub use stats::Statistics;
