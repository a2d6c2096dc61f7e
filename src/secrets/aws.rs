//! AWS Secrets Manager backend implementation.
//!
//! Fetches secret bundles from AWS Secrets Manager by secret identifier.
//! This is the production backend: the Pressroom deployment stores its
//! database credentials as a JSON secret (for example under the identifier
//! `book`) in a single region.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `PRESSROOM_AWS_REGION` or `AWS_REGION` - region hosting the secret
//!   (default: `eu-west-3`)
//! - `PRESSROOM_AWS_ENDPOINT_URL` - optional endpoint override, used for
//!   LocalStack and wiremock-based tests
//!
//! Credentials come from the standard AWS provider chain (environment,
//! shared profile, IMDS/IRSA on EC2 and EKS).

use serde::{Deserialize, Serialize};

#[cfg(feature = "aws")]
use super::client::SecretsClient;
#[cfg(feature = "aws")]
use super::error::{Result, SecretsError};
#[cfg(feature = "aws")]
use async_trait::async_trait;
#[cfg(feature = "aws")]
use aws_sdk_secretsmanager::error::{ProvideErrorMetadata, SdkError};
#[cfg(feature = "aws")]
use tracing::{debug, error, info};

/// Region the deployment's secrets live in when nothing else is configured.
fn default_region() -> String {
    "eu-west-3".to_string()
}

/// Configuration for the AWS Secrets Manager backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsBackendConfig {
    /// AWS region hosting the secrets
    #[serde(default = "default_region")]
    pub region: String,

    /// Optional endpoint override (LocalStack, tests)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for AwsBackendConfig {
    fn default() -> Self {
        Self { region: default_region(), endpoint_url: None }
    }
}

impl AwsBackendConfig {
    /// Load configuration from environment variables.
    ///
    /// Uses:
    /// - `PRESSROOM_AWS_REGION` or `AWS_REGION` (default: `eu-west-3`)
    /// - `PRESSROOM_AWS_ENDPOINT_URL` (optional)
    pub fn from_env() -> Self {
        let region = std::env::var("PRESSROOM_AWS_REGION")
            .or_else(|_| std::env::var("AWS_REGION"))
            .unwrap_or_else(|_| default_region());

        let endpoint_url = std::env::var("PRESSROOM_AWS_ENDPOINT_URL").ok();

        Self { region, endpoint_url }
    }
}

/// AWS Secrets Manager backend.
///
/// Wraps the official SDK client. Only `GetSecretValue` is ever issued; the
/// loader has no write path.
#[cfg(feature = "aws")]
pub struct AwsSecretsManagerClient {
    client: aws_sdk_secretsmanager::Client,
    region: String,
}

#[cfg(feature = "aws")]
impl std::fmt::Debug for AwsSecretsManagerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerClient")
            .field("region", &self.region)
            .field("client", &"[SecretsManager]")
            .finish()
    }
}

#[cfg(feature = "aws")]
impl AwsSecretsManagerClient {
    /// Create a new AWS Secrets Manager backend with the given configuration.
    pub async fn new(config: AwsBackendConfig) -> Result<Self> {
        if config.region.is_empty() {
            return Err(SecretsError::config_error("AWS region cannot be empty"));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref endpoint) = config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = aws_sdk_secretsmanager::Client::new(&sdk_config);

        info!(
            region = %config.region,
            endpoint_override = config.endpoint_url.is_some(),
            "Initialized AWS Secrets Manager backend"
        );

        Ok(Self { client, region: config.region })
    }

    /// Create a backend from environment configuration.
    pub async fn from_env() -> Result<Self> {
        Self::new(AwsBackendConfig::from_env()).await
    }
}

#[cfg(feature = "aws")]
#[async_trait]
impl SecretsClient for AwsSecretsManagerClient {
    async fn get_secret(&self, key: &str) -> Result<String> {
        debug!(secret_id = %key, region = %self.region, "Fetching secret from AWS Secrets Manager");

        let result = self.client.get_secret_value().secret_id(key).send().await;

        match result {
            Ok(output) => {
                // Binary-only secrets have no SecretString; the loader
                // requires a JSON string payload.
                output.secret_string().map(str::to_owned).ok_or_else(|| {
                    SecretsError::malformed_payload(key, "secret has no string payload")
                })
            }
            Err(SdkError::ServiceError(ctx)) => {
                let service_err = ctx.into_err();
                if service_err.is_resource_not_found_exception() {
                    error!(secret_id = %key, region = %self.region, "Secret not found in AWS Secrets Manager");
                    return Err(SecretsError::not_found(key));
                }

                let code = service_err.code().unwrap_or("Unknown").to_string();
                let message = service_err.message().unwrap_or("no message").to_string();
                error!(secret_id = %key, code = %code, "AWS Secrets Manager request rejected");

                if code.contains("AccessDenied")
                    || code.contains("UnrecognizedClient")
                    || code.contains("InvalidSignature")
                    || code.contains("ExpiredToken")
                {
                    Err(SecretsError::authentication_failed(format!("{}: {}", code, message)))
                } else {
                    Err(SecretsError::backend_error(format!("{}: {}", code, message)))
                }
            }
            Err(err @ SdkError::TimeoutError(_)) | Err(err @ SdkError::DispatchFailure(_)) => {
                error!(secret_id = %key, error = %err, "Failed to reach AWS Secrets Manager");
                Err(SecretsError::connection_failed(err.to_string()))
            }
            Err(err) => {
                error!(secret_id = %key, error = %err, "AWS Secrets Manager request failed");
                Err(SecretsError::backend_error(err.to_string()))
            }
        }
    }
}

// Stub struct for non-feature builds (allows the type to exist but not be
// constructable)
#[cfg(not(feature = "aws"))]
pub struct AwsSecretsManagerClient {
    _private: (),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_matches_deployment() {
        assert_eq!(default_region(), "eu-west-3");
        assert_eq!(AwsBackendConfig::default().region, "eu-west-3");
    }

    // Note: environment-based tests use unique variable names to avoid
    // clashes during parallel execution.

    #[test]
    fn test_config_from_env_defaults() {
        let prev_pr = std::env::var("PRESSROOM_AWS_REGION").ok();
        let prev_aws = std::env::var("AWS_REGION").ok();
        std::env::remove_var("PRESSROOM_AWS_REGION");
        std::env::remove_var("AWS_REGION");
        std::env::remove_var("PRESSROOM_AWS_ENDPOINT_URL");

        let config = AwsBackendConfig::from_env();
        assert_eq!(config.region, "eu-west-3");
        assert!(config.endpoint_url.is_none());

        if let Some(v) = prev_pr {
            std::env::set_var("PRESSROOM_AWS_REGION", v);
        }
        if let Some(v) = prev_aws {
            std::env::set_var("AWS_REGION", v);
        }
    }

    #[test]
    fn test_config_from_env_pressroom_prefix_wins() {
        std::env::set_var("PRESSROOM_AWS_REGION", "us-east-1");

        let config = AwsBackendConfig::from_env();
        assert_eq!(config.region, "us-east-1");

        std::env::remove_var("PRESSROOM_AWS_REGION");
    }

    #[test]
    fn test_config_serialization() {
        let config = AwsBackendConfig {
            region: "eu-west-3".to_string(),
            endpoint_url: Some("http://localhost:4566".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("eu-west-3"));

        let parsed: AwsBackendConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.region, config.region);
        assert_eq!(parsed.endpoint_url, config.endpoint_url);
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let parsed: AwsBackendConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.region, "eu-west-3");
        assert!(parsed.endpoint_url.is_none());
    }
}
