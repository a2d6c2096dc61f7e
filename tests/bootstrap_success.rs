//! End-to-end success path: fetch, decode, install, delegate.
//!
//! The write-once install point is process-global, so this binary holds the
//! single test that drives `launch` to completion.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use pressroom::bootstrap::{self, HostApp};
use pressroom::config::{self, AppConfig, ConfigLoader};
use pressroom::secrets::{error::Result as SecretsResult, SecretsClient};
use pressroom::Result;

const BUNDLE_PAYLOAD: &str =
    r#"{"MYSQL_DATABASE":"db","MYSQL_USER":"u","MYSQL_PASSWORD":"p","MYSQL_HOST":"h"}"#;

struct StubSecretsClient;

#[async_trait]
impl SecretsClient for StubSecretsClient {
    async fn get_secret(&self, key: &str) -> SecretsResult<String> {
        assert_eq!(key, "book");
        Ok(BUNDLE_PAYLOAD.to_string())
    }
}

/// Counts invocations and checks the configuration is complete by the time
/// the host sees it.
struct CountingHost {
    calls: AtomicUsize,
}

#[async_trait]
impl HostApp for CountingHost {
    async fn init(&self, config: &AppConfig) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Constants are fully defined and installed before delegation
        assert_eq!(config.database.charset, "utf8");
        assert!(config::installed().is_some());
        Ok(())
    }
}

#[tokio::test]
async fn test_launch_success_defines_constants_then_delegates_once() {
    let loader = ConfigLoader::new(StubSecretsClient, "book");
    let host = CountingHost { calls: AtomicUsize::new(0) };

    let config = bootstrap::launch(&loader, &host).await.unwrap();

    // Database settings come from the bundle
    assert_eq!(config.database.name, "db");
    assert_eq!(config.database.user, "u");
    assert_eq!(config.database.password.expose_secret(), "p");
    assert_eq!(config.database.host, "h");
    assert_eq!(config.database.charset, "utf8");
    assert_eq!(config.database.collation, "");

    // Static flags are policy, independent of the bundle
    assert!(!config.site.debug);
    assert!(config.site.force_ssl_admin);
    assert!(config.site.force_ssl_login);
    assert_eq!(config.site.memory_limit, "256M");

    // The host was invoked exactly once
    assert_eq!(host.calls.load(Ordering::SeqCst), 1);

    // And the installed process-wide config is the same value
    let installed = config::installed().unwrap();
    assert_eq!(installed.database.name, "db");
}
