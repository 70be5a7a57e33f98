//! Lock-free counter.
//!
//! Values are signed 64-bit and wrap on overflow, so a counter fed arbitrary
//! `i64` increments never panics.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at `v`.
    pub fn with_value(v: i64) -> Self {
        Self {
            value: AtomicI64::new(v),
        }
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.inc_by(1);
    }

    /// Increment by an arbitrary value.
    pub fn inc_by(&self, n: i64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Decrement by an arbitrary value.
    pub fn dec_by(&self, n: i64) {
        self.value.fetch_sub(n, Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter").field("count", &self.get()).finish()
    }
}
