//! # Structured Logging
//!
//! Tracing-based structured logging for the bootstrap. Kept deliberately
//! small: there is no metrics or distributed-tracing surface here, just an
//! env-filtered subscriber with optional JSON output so deployment logs can
//! be shipped to a log aggregator.
//!
//! Secret values never reach the log stream; sensitive configuration fields
//! are `SecretString` and redact themselves.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::errors::{Error, Result};

/// Logging configuration for the bootstrap binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level / filter directive (trace, debug, info, warn, error)
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logging: false }
    }
}

impl ObservabilityConfig {
    /// Load logging configuration from environment variables.
    ///
    /// - `PRESSROOM_LOG_LEVEL` (default: "info")
    /// - `PRESSROOM_LOG_JSON` ("true"/"1" enables JSON output)
    pub fn from_env() -> Self {
        let log_level =
            std::env::var("PRESSROOM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let json_logging = std::env::var("PRESSROOM_LOG_JSON")
            .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
            .unwrap_or(false);

        Self { log_level, json_logging }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns a configuration error if the filter directive is invalid or a
/// subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| {
        Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
    })?;

    let result = if config.json_logging {
        tracing_subscriber::fmt().with_env_filter(filter).json().try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| Error::config(format!("Failed to initialize tracing: {}", e)))
}

/// Log the effective configuration at startup. Secret fields are redacted by
/// their types, never by this function.
pub fn log_config_info(config: &AppConfig) {
    tracing::info!(
        database = %config.database.name,
        db_host = %config.database.host,
        db_charset = %config.database.charset,
        table_prefix = %config.site.table_prefix,
        debug = config.site.debug,
        force_ssl_admin = config.site.force_ssl_admin,
        force_ssl_login = config.site.force_ssl_login,
        memory_limit = %config.site.memory_limit,
        auth_keys_placeholder = config.auth.uses_placeholders(),
        "Pressroom bootstrap configuration"
    );
}
