//! Secret-backed configuration loader.
//!
//! Fetches the named secret bundle from a [`SecretsClient`] backend, decodes
//! it, and assembles the immutable [`AppConfig`]. The loader returns typed
//! errors; whether a failure is fatal is the caller's decision.

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::settings::{AppConfig, AuthKeys, DatabaseSettings, SiteSettings};
use crate::errors::Result;
use crate::secrets::{SecretsClient, SecretsError, SecretString};

/// Secret identifier used when nothing else is configured.
pub const DEFAULT_SECRET_ID: &str = "book";

/// Environment variable overriding the secret identifier.
const ENV_SECRET_ID: &str = "PRESSROOM_DB_SECRET_ID";

/// The decoded secret bundle.
///
/// One fetch per process start; consumed immediately to populate
/// [`DatabaseSettings`] and then discarded. All four keys are required -
/// a bundle missing any of them is rejected as malformed rather than
/// producing empty connection parameters. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct SecretBundle {
    #[serde(rename = "MYSQL_DATABASE")]
    pub database: String,

    #[serde(rename = "MYSQL_USER")]
    pub user: String,

    #[serde(rename = "MYSQL_PASSWORD")]
    pub password: SecretString,

    #[serde(rename = "MYSQL_HOST")]
    pub host: String,
}

/// Resolve the secret identifier from the environment.
pub fn secret_id_from_env() -> String {
    std::env::var(ENV_SECRET_ID).unwrap_or_else(|_| DEFAULT_SECRET_ID.to_string())
}

/// Loads the application configuration from a secrets backend.
///
/// ```rust,ignore
/// use pressroom::config::ConfigLoader;
/// use pressroom::secrets::AwsSecretsManagerClient;
///
/// let client = AwsSecretsManagerClient::from_env().await?;
/// let loader = ConfigLoader::new(client, "book");
/// let config = loader.load().await?;
/// ```
pub struct ConfigLoader<C: SecretsClient> {
    client: C,
    secret_id: String,
}

impl<C: SecretsClient> ConfigLoader<C> {
    /// Create a loader for the given backend and secret identifier.
    pub fn new(client: C, secret_id: impl Into<String>) -> Self {
        Self { client, secret_id: secret_id.into() }
    }

    /// The secret identifier this loader fetches.
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Fetch and decode the secret bundle, then assemble the configuration.
    ///
    /// No retry and no partial degradation: a single failure of the fetch or
    /// the decode is returned as-is for the caller to act on.
    pub async fn load(&self) -> Result<AppConfig> {
        let payload = self.client.get_secret(&self.secret_id).await?;

        let bundle: SecretBundle = serde_json::from_str(&payload)
            .map_err(|e| SecretsError::malformed_payload(&self.secret_id, e.to_string()))?;

        let config = AppConfig {
            database: DatabaseSettings {
                name: bundle.database,
                user: bundle.user,
                password: bundle.password,
                host: bundle.host,
                ..Default::default()
            },
            auth: AuthKeys::from_env(),
            site: SiteSettings::default(),
        };

        config.validate()?;

        if config.auth.uses_placeholders() {
            warn!(
                "One or more auth keys still carry the shipped placeholder value; \
                 set the PRESSROOM_AUTH_* variables before serving real traffic"
            );
        }

        info!(
            secret_id = %self.secret_id,
            database = %config.database.name,
            db_host = %config.database.host,
            "Loaded configuration from secrets backend"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use async_trait::async_trait;
    use crate::secrets::error::Result as SecretsResult;

    struct StaticSecretsClient {
        payload: &'static str,
    }

    #[async_trait]
    impl SecretsClient for StaticSecretsClient {
        async fn get_secret(&self, key: &str) -> SecretsResult<String> {
            assert_eq!(key, "book");
            Ok(self.payload.to_string())
        }
    }

    struct FailingSecretsClient;

    #[async_trait]
    impl SecretsClient for FailingSecretsClient {
        async fn get_secret(&self, _key: &str) -> SecretsResult<String> {
            Err(SecretsError::connection_failed("connection refused"))
        }
    }

    const VALID_PAYLOAD: &str =
        r#"{"MYSQL_DATABASE":"db","MYSQL_USER":"u","MYSQL_PASSWORD":"p","MYSQL_HOST":"h"}"#;

    #[tokio::test]
    async fn test_load_success_maps_bundle_fields() {
        let loader = ConfigLoader::new(StaticSecretsClient { payload: VALID_PAYLOAD }, "book");
        let config = loader.load().await.unwrap();

        assert_eq!(config.database.name, "db");
        assert_eq!(config.database.user, "u");
        assert_eq!(config.database.password.expose_secret(), "p");
        assert_eq!(config.database.host, "h");
        assert_eq!(config.database.charset, "utf8");
        assert_eq!(config.database.collation, "");
    }

    #[tokio::test]
    async fn test_load_success_ignores_unknown_bundle_keys() {
        let loader = ConfigLoader::new(
            StaticSecretsClient {
                payload: r#"{"MYSQL_DATABASE":"db","MYSQL_USER":"u","MYSQL_PASSWORD":"p",
                             "MYSQL_HOST":"h","MYSQL_PORT":"3306","DEBUG":"true"}"#,
            },
            "book",
        );
        let config = loader.load().await.unwrap();

        // Static flags never derive from the bundle
        assert!(!config.site.debug);
        assert!(config.site.force_ssl_admin);
        assert!(config.site.force_ssl_login);
    }

    #[tokio::test]
    async fn test_load_service_error_propagates() {
        let loader = ConfigLoader::new(FailingSecretsClient, "book");
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, Error::Secrets(SecretsError::ConnectionFailed { .. })));
    }

    #[tokio::test]
    async fn test_load_rejects_non_json_payload() {
        let loader =
            ConfigLoader::new(StaticSecretsClient { payload: "not json at all" }, "book");
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, Error::Secrets(SecretsError::MalformedPayload { .. })));
    }

    #[tokio::test]
    async fn test_load_rejects_missing_bundle_key() {
        let loader = ConfigLoader::new(
            StaticSecretsClient {
                payload: r#"{"MYSQL_DATABASE":"db","MYSQL_USER":"u","MYSQL_PASSWORD":"p"}"#,
            },
            "book",
        );
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, Error::Secrets(SecretsError::MalformedPayload { .. })));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_load_warns_on_placeholder_auth_keys() {
        let loader = ConfigLoader::new(StaticSecretsClient { payload: VALID_PAYLOAD }, "book");
        loader.load().await.unwrap();
        assert!(logs_contain("placeholder"));
    }

    #[test]
    fn test_secret_id_from_env_default() {
        std::env::remove_var(ENV_SECRET_ID);
        assert_eq!(secret_id_from_env(), "book");

        std::env::set_var(ENV_SECRET_ID, "press-prod");
        assert_eq!(secret_id_from_env(), "press-prod");
        std::env::remove_var(ENV_SECRET_ID);
    }
}
