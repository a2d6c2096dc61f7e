//! # Configuration Settings
//!
//! Defines the configuration surface the Pressroom host application relies
//! on. The original deployment exposed these as process-global constants;
//! here they form one immutable [`AppConfig`] value built once at startup
//! and passed by reference to whatever consumes it.

use crate::errors::{Error, Result};
use crate::secrets::SecretString;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Placeholder value shipped for unconfigured auth keys. Deployments must
/// override these; the loader warns when any placeholder survives.
pub const AUTH_KEY_PLACEHOLDER: &str = "put your unique phrase here";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Database connection settings
    #[validate(nested)]
    pub database: DatabaseSettings,

    /// Authentication unique keys and salts
    pub auth: AuthKeys,

    /// Site-wide settings
    #[validate(nested)]
    pub site: SiteSettings,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()?;
        Ok(())
    }

    /// Custom validation logic that goes beyond what the validator crate can do
    fn validate_custom(&self) -> Result<()> {
        // Table prefixes end up in SQL identifiers. Only numbers, letters,
        // and underscores please!
        if !self
            .site
            .table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::config(
                "Table prefix may only contain letters, numbers, and underscores",
            ));
        }

        if self.site.memory_limit_bytes().is_none() {
            return Err(Error::config(format!(
                "Invalid memory limit '{}': expected a number with optional K/M/G suffix",
                self.site.memory_limit
            )));
        }

        Ok(())
    }
}

fn default_charset() -> String {
    "utf8".to_string()
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseSettings {
    /// The name of the database for the host application
    #[validate(length(min = 1, message = "Database name cannot be empty"))]
    pub name: String,

    /// Database username
    #[validate(length(min = 1, message = "Database user cannot be empty"))]
    pub user: String,

    /// Database password
    pub password: SecretString,

    /// Database hostname
    #[validate(length(min = 1, message = "Database host cannot be empty"))]
    pub host: String,

    /// Character set used when creating database tables
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Collation type. Empty means the server default; don't change this if
    /// in doubt.
    #[serde(default)]
    pub collation: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            user: String::new(),
            password: SecretString::default(),
            host: String::new(),
            charset: default_charset(),
            collation: String::new(),
        }
    }
}

/// Authentication unique keys and salts.
///
/// Changing any of these at runtime invalidates all existing cookies and
/// forces every user to log in again. Defaults are publicly-known
/// placeholders; see [`AuthKeys::uses_placeholders`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthKeys {
    pub auth_key: SecretString,
    pub secure_auth_key: SecretString,
    pub logged_in_key: SecretString,
    pub nonce_key: SecretString,
    pub auth_salt: SecretString,
    pub secure_auth_salt: SecretString,
    pub logged_in_salt: SecretString,
    pub nonce_salt: SecretString,
}

impl Default for AuthKeys {
    fn default() -> Self {
        let placeholder = || SecretString::new(AUTH_KEY_PLACEHOLDER);
        Self {
            auth_key: placeholder(),
            secure_auth_key: placeholder(),
            logged_in_key: placeholder(),
            nonce_key: placeholder(),
            auth_salt: placeholder(),
            secure_auth_salt: placeholder(),
            logged_in_salt: placeholder(),
            nonce_salt: placeholder(),
        }
    }
}

impl AuthKeys {
    /// Build auth keys from `PRESSROOM_AUTH_*` environment variables,
    /// keeping the placeholder for any variable that is not set.
    ///
    /// Variables: `PRESSROOM_AUTH_KEY`, `PRESSROOM_SECURE_AUTH_KEY`,
    /// `PRESSROOM_LOGGED_IN_KEY`, `PRESSROOM_NONCE_KEY`,
    /// `PRESSROOM_AUTH_SALT`, `PRESSROOM_SECURE_AUTH_SALT`,
    /// `PRESSROOM_LOGGED_IN_SALT`, `PRESSROOM_NONCE_SALT`.
    pub fn from_env() -> Self {
        let read = |var: &str| {
            std::env::var(var)
                .map(SecretString::new)
                .unwrap_or_else(|_| SecretString::new(AUTH_KEY_PLACEHOLDER))
        };

        Self {
            auth_key: read("PRESSROOM_AUTH_KEY"),
            secure_auth_key: read("PRESSROOM_SECURE_AUTH_KEY"),
            logged_in_key: read("PRESSROOM_LOGGED_IN_KEY"),
            nonce_key: read("PRESSROOM_NONCE_KEY"),
            auth_salt: read("PRESSROOM_AUTH_SALT"),
            secure_auth_salt: read("PRESSROOM_SECURE_AUTH_SALT"),
            logged_in_salt: read("PRESSROOM_LOGGED_IN_SALT"),
            nonce_salt: read("PRESSROOM_NONCE_SALT"),
        }
    }

    /// Returns true if any key still carries the shipped placeholder value.
    pub fn uses_placeholders(&self) -> bool {
        [
            &self.auth_key,
            &self.secure_auth_key,
            &self.logged_in_key,
            &self.nonce_key,
            &self.auth_salt,
            &self.secure_auth_salt,
            &self.logged_in_salt,
            &self.nonce_salt,
        ]
        .iter()
        .any(|key| key.expose_secret() == AUTH_KEY_PLACEHOLDER)
    }
}

fn default_table_prefix() -> String {
    "press_".to_string()
}

fn default_memory_limit() -> String {
    "256M".to_string()
}

fn default_true() -> bool {
    true
}

/// Site-wide settings.
///
/// The debug flag and the two force-SSL flags are fixed policy: they never
/// derive from the secret bundle, regardless of its contents.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SiteSettings {
    /// Table name prefix. Multiple installations can share one database if
    /// each gets a unique prefix.
    #[serde(default = "default_table_prefix")]
    #[validate(length(min = 1, message = "Table prefix cannot be empty"))]
    pub table_prefix: String,

    /// Debugging mode. Enables display of notices during development.
    #[serde(default)]
    pub debug: bool,

    /// Require encrypted transport for the admin surface
    #[serde(default = "default_true")]
    pub force_ssl_admin: bool,

    /// Require encrypted transport for the login surface
    #[serde(default = "default_true")]
    pub force_ssl_login: bool,

    /// Memory limit granted to the host application (e.g. "256M")
    #[serde(default = "default_memory_limit")]
    #[validate(length(min = 1, message = "Memory limit cannot be empty"))]
    pub memory_limit: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            table_prefix: default_table_prefix(),
            debug: false,
            force_ssl_admin: true,
            force_ssl_login: true,
            memory_limit: default_memory_limit(),
        }
    }
}

impl SiteSettings {
    /// Parse the memory limit into bytes. `None` if the value is malformed.
    ///
    /// Accepts a plain byte count or a number with a K/M/G suffix
    /// (case-insensitive).
    pub fn memory_limit_bytes(&self) -> Option<u64> {
        let value = self.memory_limit.trim();
        if value.is_empty() {
            return None;
        }

        let (digits, multiplier) = match value.chars().last() {
            Some('k') | Some('K') => (&value[..value.len() - 1], 1024u64),
            Some('m') | Some('M') => (&value[..value.len() - 1], 1024 * 1024),
            Some('g') | Some('G') => (&value[..value.len() - 1], 1024 * 1024 * 1024),
            _ => (value, 1),
        };

        digits.parse::<u64>().ok()?.checked_mul(multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_database() -> DatabaseSettings {
        DatabaseSettings {
            name: "press".to_string(),
            user: "press".to_string(),
            password: SecretString::new("pw"),
            host: "db.internal".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_site_settings_are_fixed_policy() {
        let site = SiteSettings::default();
        assert!(!site.debug);
        assert!(site.force_ssl_admin);
        assert!(site.force_ssl_login);
        assert_eq!(site.memory_limit, "256M");
        assert_eq!(site.table_prefix, "press_");
    }

    #[test]
    fn test_default_database_charset_and_collation() {
        let db = DatabaseSettings::default();
        assert_eq!(db.charset, "utf8");
        assert_eq!(db.collation, "");
    }

    #[test]
    fn test_config_validation_rejects_empty_database_fields() {
        let config = AppConfig { database: DatabaseSettings::default(), ..Default::default() };
        assert!(config.validate().is_err());

        let config = AppConfig { database: valid_database(), ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_bad_table_prefix() {
        let mut config = AppConfig { database: valid_database(), ..Default::default() };
        config.site.table_prefix = "press;drop_".to_string();
        assert!(config.validate().is_err());

        config.site.table_prefix = "press2_".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_limit_parsing() {
        let mut site = SiteSettings::default();
        assert_eq!(site.memory_limit_bytes(), Some(256 * 1024 * 1024));

        site.memory_limit = "1G".to_string();
        assert_eq!(site.memory_limit_bytes(), Some(1024 * 1024 * 1024));

        site.memory_limit = "512k".to_string();
        assert_eq!(site.memory_limit_bytes(), Some(512 * 1024));

        site.memory_limit = "1048576".to_string();
        assert_eq!(site.memory_limit_bytes(), Some(1024 * 1024));

        site.memory_limit = "lots".to_string();
        assert_eq!(site.memory_limit_bytes(), None);
    }

    #[test]
    fn test_config_validation_rejects_bad_memory_limit() {
        let mut config = AppConfig { database: valid_database(), ..Default::default() };
        config.site.memory_limit = "256Q".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auth_keys_placeholder_detection() {
        let keys = AuthKeys::default();
        assert!(keys.uses_placeholders());

        let mut keys = AuthKeys::default();
        keys.auth_key = SecretString::new("d8@#Fq...unique");
        // One real key is not enough; every key must be overridden
        assert!(keys.uses_placeholders());
    }

    #[test]
    fn test_auth_keys_from_env_overrides() {
        std::env::set_var("PRESSROOM_AUTH_KEY", "env-provided-key");

        let keys = AuthKeys::from_env();
        assert_eq!(keys.auth_key.expose_secret(), "env-provided-key");
        assert_eq!(keys.nonce_salt.expose_secret(), AUTH_KEY_PLACEHOLDER);

        std::env::remove_var("PRESSROOM_AUTH_KEY");
    }

    #[test]
    fn test_serialized_config_redacts_secrets() {
        let config = AppConfig {
            database: DatabaseSettings {
                password: SecretString::new("hunter2"),
                ..valid_database()
            },
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains(AUTH_KEY_PLACEHOLDER));
        assert!(json.contains("db.internal"));
    }
}
