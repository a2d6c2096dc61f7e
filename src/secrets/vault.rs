//! HashiCorp Vault secrets backend implementation.
//!
//! Integrates with Vault's KV v2 secrets engine through the [`SecretsClient`]
//! trait. Deployments that keep their credentials in Vault instead of AWS
//! Secrets Manager store the same JSON bundle either as the `value` field of
//! a KV entry or as the KV entry's fields themselves.
//!
//! # Configuration
//!
//! - `VAULT_ADDR`: Vault server address (HTTPS recommended)
//! - `VAULT_TOKEN`: authentication token
//! - `VAULT_NAMESPACE`: optional namespace for multi-tenancy
//! - `VAULT_MOUNT_PATH`: KV v2 mount path (default: `secret`)
//!
//! # Example
//!
//! ```rust,ignore
//! use pressroom::secrets::{VaultSecretsClient, VaultConfig};
//!
//! let config = VaultConfig {
//!     address: "https://vault.example.com".to_string(),
//!     token: Some("vault-token".to_string()),
//!     namespace: None,
//!     mount_path: "secret".to_string(),
//! };
//!
//! let client = VaultSecretsClient::new(config).await?;
//! let payload = client.get_secret("book").await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::kv2;

use super::client::SecretsClient;
use super::error::{Result, SecretsError};

/// Configuration for connecting to HashiCorp Vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault server address
    pub address: String,

    /// Authentication token (never logged)
    pub token: Option<String>,

    /// Optional namespace for multi-tenancy
    pub namespace: Option<String>,

    /// KV v2 mount path (default: "secret")
    pub mount_path: String,
}

impl VaultConfig {
    /// Load Vault configuration from standard environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::ConfigError`] if `VAULT_ADDR` is not set.
    pub fn from_env() -> Result<Self> {
        let address = std::env::var("VAULT_ADDR")
            .map_err(|_| SecretsError::config_error("VAULT_ADDR is not set"))?;
        let token = std::env::var("VAULT_TOKEN").ok();
        let namespace = std::env::var("VAULT_NAMESPACE").ok();
        let mount_path =
            std::env::var("VAULT_MOUNT_PATH").unwrap_or_else(|_| "secret".to_string());

        Ok(Self { address, token, namespace, mount_path })
    }
}

/// HashiCorp Vault KV v2 secrets backend.
pub struct VaultSecretsClient {
    client: VaultClient,
    mount_path: String,
}

impl std::fmt::Debug for VaultSecretsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecretsClient")
            .field("mount_path", &self.mount_path)
            .finish_non_exhaustive()
    }
}

impl VaultSecretsClient {
    /// Creates a new Vault secrets client with the given configuration.
    ///
    /// Performs a health check against the server so misconfiguration
    /// surfaces at startup rather than on the first read.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConnectionFailed`] if Vault is unreachable
    /// - [`SecretsError::ConfigError`] if configuration is invalid
    pub async fn new(config: VaultConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(SecretsError::config_error("Vault address cannot be empty"));
        }

        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address);

        if let Some(ref token) = config.token {
            settings_builder.token(token);
        }

        if let Some(namespace) = config.namespace {
            settings_builder.namespace(Some(namespace));
        }

        let settings = settings_builder.build().map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault configuration: {}", e))
        })?;

        let client = VaultClient::new(settings).map_err(|e| {
            SecretsError::connection_failed(format!("Failed to create Vault client: {}", e))
        })?;

        match vaultrs::sys::health(&client).await {
            Ok(_) => {
                tracing::info!(address = %config.address, "Successfully connected to Vault");
            }
            Err(e) => {
                tracing::error!(error = %e, address = %config.address, "Failed to connect to Vault");
                return Err(SecretsError::connection_failed(format!(
                    "Vault health check failed: {}",
                    e
                )));
            }
        }

        Ok(Self { client, mount_path: config.mount_path })
    }

    /// Creates a Vault client from environment variables.
    pub async fn from_env() -> Result<Self> {
        Self::new(VaultConfig::from_env()?).await
    }
}

#[async_trait]
impl SecretsClient for VaultSecretsClient {
    async fn get_secret(&self, key: &str) -> Result<String> {
        // Read the latest version of the entry from KV v2
        let entry: HashMap<String, serde_json::Value> =
            kv2::read(&self.client, &self.mount_path, key).await.map_err(|e| {
                tracing::error!(error = %e, key = %key, "Failed to read secret from Vault");
                SecretsError::not_found(format!("Secret '{}' not found: {}", key, e))
            })?;

        // Convention: a single "value" field holds the raw payload string.
        // Entries without it are treated as the payload object itself, so
        // bundles can be stored Vault-natively as individual KV fields.
        if let Some(serde_json::Value::String(payload)) = entry.get("value") {
            return Ok(payload.clone());
        }

        serde_json::to_string(&entry).map_err(SecretsError::from)
    }
}
