//! Fallback secrets client with primary and secondary backends.
//!
//! Tries a primary backend first and falls back to a secondary backend
//! (typically environment variables) if the primary fails. Useful for local
//! development against production-shaped wiring; production deployments
//! should use the primary backend exclusively.
//!
//! ```rust,ignore
//! use pressroom::secrets::{AwsSecretsManagerClient, EnvVarSecretsClient, FallbackSecretsClient};
//!
//! let aws = AwsSecretsManagerClient::from_env().await?;
//! let client = FallbackSecretsClient::new(aws, EnvVarSecretsClient::new());
//!
//! // Tries AWS first, then PRESSROOM_SECRET_BOOK
//! let payload = client.get_secret("book").await?;
//! ```

use async_trait::async_trait;

use super::client::SecretsClient;
use super::error::{Result, SecretsError};

/// Fallback secrets client with primary and secondary backends.
///
/// # Type Parameters
///
/// * `P` - Primary secrets backend (e.g., `AwsSecretsManagerClient`)
/// * `S` - Secondary/fallback backend (e.g., `EnvVarSecretsClient`)
pub struct FallbackSecretsClient<P: SecretsClient, S: SecretsClient> {
    primary: P,
    secondary: S,
}

impl<P: SecretsClient, S: SecretsClient> FallbackSecretsClient<P, S> {
    /// Creates a new fallback secrets client.
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// Try an operation on primary, fall back to secondary if it fails.
    async fn try_with_fallback<T, F, G>(&self, primary_op: F, secondary_op: G) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
        G: std::future::Future<Output = Result<T>>,
    {
        match primary_op.await {
            Ok(result) => Ok(result),
            Err(primary_error) => {
                tracing::warn!(
                    error = %primary_error,
                    "Primary secrets backend failed, attempting fallback"
                );
                secondary_op.await.map_err(|secondary_error| {
                    tracing::error!(
                        primary_error = %primary_error,
                        secondary_error = %secondary_error,
                        "Both primary and fallback secrets backends failed"
                    );
                    SecretsError::backend_error(format!(
                        "Primary backend failed: {}. Fallback also failed: {}",
                        primary_error, secondary_error
                    ))
                })
            }
        }
    }
}

#[async_trait]
impl<P: SecretsClient, S: SecretsClient> SecretsClient for FallbackSecretsClient<P, S> {
    async fn get_secret(&self, key: &str) -> Result<String> {
        self.try_with_fallback(self.primary.get_secret(key), self.secondary.get_secret(key)).await
    }

    async fn secret_exists(&self, key: &str) -> Result<bool> {
        self.try_with_fallback(self.primary.secret_exists(key), self.secondary.secret_exists(key))
            .await
    }
}
