//! Startup sequence: load configuration, then hand off to the host
//! application.
//!
//! The flow is linear. Fetch the secret bundle, build the immutable
//! [`AppConfig`], delegate to the host application's initialization entry
//! point - or return the error untouched so the binary can decide what a
//! failure means. The host is invoked exactly once, only after the full
//! configuration exists, and never on the failure path.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::info;

use crate::config::{AppConfig, ConfigLoader};
use crate::errors::{Error, Result};
use crate::observability;
use crate::secrets::SecretsClient;

/// Environment variable naming the host application entry point.
const ENV_HOST_APP: &str = "PRESSROOM_HOST_APP";

/// The host application's initialization entry point.
///
/// Production uses [`ProcessHost`]; tests substitute counting stubs.
#[async_trait]
pub trait HostApp: Send + Sync {
    /// Initialize the host application with the loaded configuration.
    async fn init(&self, config: &AppConfig) -> Result<()>;
}

/// Load the configuration, install it process-wide, and delegate to the
/// host application.
///
/// Strictly linear: fetch → install constants → delegate. Any load or
/// install failure is returned before the host is touched; the installed
/// reference is returned on success.
pub async fn launch<C, H>(loader: &ConfigLoader<C>, host: &H) -> Result<&'static AppConfig>
where
    C: SecretsClient,
    H: HostApp,
{
    let config = loader.load().await?;
    let config = crate::config::install(config)?;
    observability::log_config_info(config);

    host.init(config).await?;
    info!("Handed off to host application");

    Ok(config)
}

/// Host application hand-off that executes the entry point as a child
/// process.
///
/// The configuration surface travels to the child through `PRESSROOM_*`
/// environment variables; the child owns the rest of the process lifetime.
/// Passing secrets through the environment keeps the hand-off file-free, at
/// the cost of exposing them to the child's process environment - same
/// trust domain, so acceptable.
#[derive(Debug, Clone)]
pub struct ProcessHost {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessHost {
    /// Create a hand-off for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    /// Add arguments passed to the host program.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the host program from `PRESSROOM_HOST_APP`.
    pub fn from_env() -> Result<Self> {
        let program = std::env::var(ENV_HOST_APP)
            .map_err(|_| Error::config(format!("{} is not set", ENV_HOST_APP)))?;
        Ok(Self::new(program))
    }

    /// Environment variables exported to the host process.
    fn host_env(config: &AppConfig) -> Vec<(&'static str, String)> {
        vec![
            ("PRESSROOM_DB_NAME", config.database.name.clone()),
            ("PRESSROOM_DB_USER", config.database.user.clone()),
            ("PRESSROOM_DB_PASSWORD", config.database.password.expose_secret().to_string()),
            ("PRESSROOM_DB_HOST", config.database.host.clone()),
            ("PRESSROOM_DB_CHARSET", config.database.charset.clone()),
            ("PRESSROOM_DB_COLLATE", config.database.collation.clone()),
            ("PRESSROOM_TABLE_PREFIX", config.site.table_prefix.clone()),
            ("PRESSROOM_DEBUG", config.site.debug.to_string()),
            ("PRESSROOM_FORCE_SSL_ADMIN", config.site.force_ssl_admin.to_string()),
            ("PRESSROOM_FORCE_SSL_LOGIN", config.site.force_ssl_login.to_string()),
            ("PRESSROOM_MEMORY_LIMIT", config.site.memory_limit.clone()),
            ("PRESSROOM_AUTH_KEY", config.auth.auth_key.expose_secret().to_string()),
            ("PRESSROOM_SECURE_AUTH_KEY", config.auth.secure_auth_key.expose_secret().to_string()),
            ("PRESSROOM_LOGGED_IN_KEY", config.auth.logged_in_key.expose_secret().to_string()),
            ("PRESSROOM_NONCE_KEY", config.auth.nonce_key.expose_secret().to_string()),
            ("PRESSROOM_AUTH_SALT", config.auth.auth_salt.expose_secret().to_string()),
            ("PRESSROOM_SECURE_AUTH_SALT", config.auth.secure_auth_salt.expose_secret().to_string()),
            ("PRESSROOM_LOGGED_IN_SALT", config.auth.logged_in_salt.expose_secret().to_string()),
            ("PRESSROOM_NONCE_SALT", config.auth.nonce_salt.expose_secret().to_string()),
        ]
    }
}

#[async_trait]
impl HostApp for ProcessHost {
    async fn init(&self, config: &AppConfig) -> Result<()> {
        info!(program = %self.program.display(), "Starting host application");

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for (key, value) in Self::host_env(config) {
            command.env(key, value);
        }

        let status = command.status().await.map_err(|e| {
            Error::bootstrap(format!(
                "Failed to start host application '{}': {}",
                self.program.display(),
                e
            ))
        })?;

        if !status.success() {
            return Err(Error::bootstrap(format!(
                "Host application '{}' exited with {}",
                self.program.display(),
                status
            )));
        }

        Ok(())
    }
}
