use introeval::infrastructure::observability::{DEFAULT_FILTER, TracingConfig};

#[test]
fn given_explicit_values_when_creating_then_default_filter_is_used() {
    let config = TracingConfig::new("prod", true);
    assert_eq!(config.environment, "prod");
    assert!(config.json_format);
    assert_eq!(config.default_filter, DEFAULT_FILTER);
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
}
