//! API configuration

use axum::http::header::{HeaderValue, InvalidHeaderValue};
use serde::Deserialize;

use core_kernel::RetryPolicy;
use infra_db::DatabaseConfig;

/// API configuration
///
/// Loaded once at startup and passed into the router; request handling
/// never reads the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Value of `Access-Control-Allow-Origin` on every response
    pub allow_origin: String,
    /// Store endpoint (PostgreSQL connection string)
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Retries for transient store failures
    pub store_max_retries: u32,
    /// Backoff base between store retries, in milliseconds
    pub store_retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allow_origin: String::new(),
            database_url: "postgres://localhost/asset_ledger".to_string(),
            log_level: "info".to_string(),
            store_max_retries: 3,
            store_retry_delay_ms: 100,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// `API_*` variables take precedence; the unprefixed `ALLOW_ORIGIN` and
    /// `DATABASE_URL` are honoured when their prefixed forms are absent.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Ok(origin) = std::env::var("ALLOW_ORIGIN") {
            builder = builder.set_default("allow_origin", origin)?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database_url", url)?;
        }

        builder
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured origin as a header value
    pub fn allow_origin_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.allow_origin)
    }

    /// Retry policy for the store adapters
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.store_max_retries, self.store_retry_delay_ms)
    }

    /// Connection pool settings for the store
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
    }
}
