pub const DEFAULT_FILTER: &str = "info,introeval=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        )
    }
}
