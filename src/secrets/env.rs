//! Environment variable secrets backend implementation.
//!
//! Reads secrets from environment variables with the `PRESSROOM_SECRET_`
//! prefix. Intended for **development and testing only** - environment
//! variables are visible in process listings, have no encryption at rest,
//! and no audit trail. Use AWS Secrets Manager or Vault in production.
//!
//! A secret bundle is stored as its JSON payload in a single variable:
//!
//! ```bash
//! export PRESSROOM_SECRET_BOOK='{"MYSQL_DATABASE":"press","MYSQL_USER":"press",...}'
//! ```

use async_trait::async_trait;
use std::env;

use super::client::SecretsClient;
use super::error::{Result, SecretsError};

/// Environment variable prefix for secrets.
const SECRET_PREFIX: &str = "PRESSROOM_SECRET_";

/// Environment variable secrets backend (development only).
#[derive(Debug, Clone, Default)]
pub struct EnvVarSecretsClient {
    // No internal state needed - reads directly from env
}

impl EnvVarSecretsClient {
    /// Creates a new environment variable secrets client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a secret key to the environment variable name.
    ///
    /// `book` becomes `PRESSROOM_SECRET_BOOK`.
    fn key_to_env_var(key: &str) -> String {
        format!("{}{}", SECRET_PREFIX, key.to_uppercase().replace('-', "_"))
    }
}

#[async_trait]
impl SecretsClient for EnvVarSecretsClient {
    async fn get_secret(&self, key: &str) -> Result<String> {
        let env_var = Self::key_to_env_var(key);

        env::var(&env_var).map_err(|_| {
            SecretsError::not_found(format!(
                "Secret '{}' not found in environment (looking for {})",
                key, env_var
            ))
        })
    }

    async fn secret_exists(&self, key: &str) -> Result<bool> {
        Ok(env::var(Self::key_to_env_var(key)).is_ok())
    }
}
