#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricreg_core::Category;
use metricreg_registry::config;
use metricreg_registry::MetricProducer;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
registries:
  - name: "core1"
    producers:
      - name: "handler1"
        metricz: [requests] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn unknown_category_fails() {
    let bad = r#"
version: 1
registries:
  - name: core1
    producers:
      - name: h
        category: NOT_A_CATEGORY
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn duplicate_registry_fails() {
    let bad = r#"
version: 1
registries:
  - name: core1
  - name: core1
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("duplicate registry name"));
}

#[test]
fn category_is_case_insensitive() {
    let ok = r#"
version: 1
registries:
  - name: core1
    producers:
      - name: h1
        category: query
      - name: h2
        category: queryParser
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let producers = &cfg.registries[0].producers;
    assert_eq!(producers[0].category, Some(Category::Query));
    assert_eq!(producers[1].category, Some(Category::QueryParser));
}

#[test]
fn duplicate_producer_key_fails() {
    // same scope under one registry
    let bad = r#"
version: 1
registries:
  - name: core1
    producers:
      - name: h1
        scope: shared
      - name: h2
        scope: shared
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
    assert!(err.to_string().contains("duplicate producer key"));

    // unscoped producers are keyed by name
    let bad = r#"
version: 1
registries:
  - name: core1
    producers:
      - name: h1
      - name: other
        scope: h1
"#;
    assert!(config::load_from_str(bad).is_err());

    // the same scope in different registries is fine
    let ok = r#"
version: 1
registries:
  - name: core1
    producers:
      - name: h1
        scope: shared
  - name: core2
    producers:
      - name: h1
        scope: shared
"#;
    assert!(config::load_from_str(ok).is_ok());
}

#[test]
fn limits_are_range_checked() {
    let bad = r#"
version: 1
limits:
  max_name_len: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(cfg.registries.is_empty());
    assert_eq!(cfg.limits.max_counters_per_registry, 0);
}

#[test]
fn producer_entries_build_producers() {
    let ok = r#"
version: 1
limits:
  max_counters_per_registry: 10
registries:
  - name: core1
    producers:
      - name: handler1
        category: QUERY
        scope: handler1
        docs: ["https://example.org/handler"]
        metrics: [requests, errors]
      - name: bare
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let producers = &cfg.registries[0].producers;

    let p = producers[0].to_producer();
    assert_eq!(p.name(), "handler1");
    assert_eq!(p.category(), Some(Category::Query));
    assert_eq!(p.docs().len(), 1);
    assert_eq!(p.metrics().unwrap().len(), 2);

    let bare = producers[1].to_producer();
    assert_eq!(bare.category(), None);
    assert_eq!(bare.version(), "0.0");
    assert!(bare.metrics().is_none());
    assert!(bare.source().is_none());
}
