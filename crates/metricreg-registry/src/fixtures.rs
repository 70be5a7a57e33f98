//! Randomized producers for exercising a `MetricManager` in tests.
//!
//! Generated names are short lowercase ASCII strings so they are valid
//! identifiers for any exporter.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;

use metricreg_core::{Category, Counter};

use crate::producer::StaticProducer;

/// Upper bound on metrics generated per call.
pub const MAX_ITERATIONS: usize = 100;

/// Appended to every invented metric name.
pub const SUFFIX: &str = "_testing";

pub type MetricSet = BTreeMap<String, Arc<Counter>>;

/// 1..=`max_len` lowercase ASCII letters.
pub fn random_simple_string<R: Rng>(rng: &mut R, max_len: usize) -> String {
    const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let len = rng.random_range(1..=max_len.max(1));
    (0..len)
        .map(|_| ALPHA[rng.random_range(0..ALPHA.len())] as char)
        .collect()
}

pub fn random_scope<R: Rng>(rng: &mut R) -> Option<String> {
    let define = rng.random_bool(0.5);
    random_scope_with(rng, define)
}

pub fn random_scope_with<R: Rng>(rng: &mut R, define: bool) -> Option<String> {
    define.then(|| random_simple_string(rng, 10))
}

pub fn random_category<R: Rng>(rng: &mut R) -> Option<Category> {
    let define = rng.random_bool(0.5);
    random_category_with(rng, define)
}

pub fn random_category_with<R: Rng>(rng: &mut R, define: bool) -> Option<Category> {
    define.then(|| Category::ALL[rng.random_range(0..Category::ALL.len())])
}

pub fn random_metrics<R: Rng>(rng: &mut R) -> Option<MetricSet> {
    let define = rng.random_bool(0.5);
    random_metrics_with(rng, define)
}

pub fn random_metrics_with<R: Rng>(rng: &mut R, define: bool) -> Option<MetricSet> {
    define.then(|| random_metrics_with_replacements(rng, &MetricSet::new()))
}

/// Generate 1..=`MAX_ITERATIONS` metrics. When `existing` is non-empty each
/// iteration may reuse one of its names instead of inventing a new one, so
/// the result overlaps `existing`. Every counter holds a random `i64`.
pub fn random_metrics_with_replacements<R: Rng>(
    rng: &mut R,
    existing: &MetricSet,
) -> MetricSet {
    let existing_keys: Vec<&String> = existing.keys().collect();
    let mut metrics = MetricSet::new();

    let n = rng.random_range(1..=MAX_ITERATIONS);
    for _ in 0..n {
        let replace = !existing_keys.is_empty() && rng.random_bool(0.5);
        let name = if replace {
            existing_keys[rng.random_range(0..existing_keys.len())].clone()
        } else {
            format!("{}{SUFFIX}", random_simple_string(rng, 10))
        };

        let counter = Counter::new();
        counter.inc_by(rng.random::<i64>());
        metrics.insert(name, Arc::new(counter));
    }
    metrics
}

/// Producer wrapping loose category/scope/metrics values.
pub fn producer_of(
    category: Option<Category>,
    scope: Option<&str>,
    metrics: Option<MetricSet>,
) -> StaticProducer {
    StaticProducer::of(category, scope, metrics)
}
