//! # Configuration Management
//!
//! The configuration surface for the Pressroom bootstrap: the settings
//! structs, the secret-backed loader that builds them, and a write-once
//! process-global installation point.

use once_cell::sync::OnceCell;

use crate::errors::{Error, Result};

pub mod loader;
pub mod settings;

pub use loader::{secret_id_from_env, ConfigLoader, SecretBundle, DEFAULT_SECRET_ID};
pub use settings::{
    AppConfig, AuthKeys, DatabaseSettings, SiteSettings, AUTH_KEY_PLACEHOLDER,
};

static INSTALLED: OnceCell<AppConfig> = OnceCell::new();

/// Install the configuration as the process-wide instance.
///
/// Write-once semantics: a second call is rejected with a configuration
/// error and the originally installed value stays untouched. This mirrors
/// the host environment's constant-definition rules, where redefinition must
/// fail rather than silently overwrite.
pub fn install(config: AppConfig) -> Result<&'static AppConfig> {
    INSTALLED
        .set(config)
        .map_err(|_| Error::config("Configuration is already installed; refusing to redefine"))?;

    Ok(INSTALLED.get().expect("config installed above"))
}

/// The installed process-wide configuration, if any.
pub fn installed() -> Option<&'static AppConfig> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretString;

    // The install point is process-global, so its whole lifecycle lives in
    // one test.
    #[test]
    fn test_install_is_write_once() {
        assert!(installed().is_none());

        let mut first = AppConfig::default();
        first.database.name = "first".to_string();
        first.database.password = SecretString::new("pw1");

        let installed_ref = install(first).unwrap();
        assert_eq!(installed_ref.database.name, "first");

        let mut second = AppConfig::default();
        second.database.name = "second".to_string();

        let err = install(second).unwrap_err();
        assert!(err.to_string().contains("already installed"));

        // The original value must be untouched
        assert_eq!(installed().unwrap().database.name, "first");
    }
}
