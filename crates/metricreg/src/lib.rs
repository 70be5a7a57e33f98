//! Top-level facade crate for metricreg.
//!
//! Re-exports the core types and the registry library so users can depend on a single crate.

pub mod core {
    pub use metricreg_core::*;
}

pub mod registry {
    pub use metricreg_registry::*;
}
