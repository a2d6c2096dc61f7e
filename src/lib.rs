//! # Pressroom Bootstrap
//!
//! Secret-backed configuration bootstrap for the Pressroom publishing
//! platform. At process startup this crate retrieves a named secret bundle
//! from a secrets-management backend, decodes it into database connection
//! parameters, builds one immutable [`AppConfig`], and hands control to the
//! host application's initialization entry point.
//!
//! ## Flow
//!
//! ```text
//! fetch secret bundle → decode → AppConfig (write-once install) → host app
//!          ↓ (on any failure)
//!   typed error to the caller; the binary decides to terminate
//! ```
//!
//! ## Core Components
//!
//! - **Secrets layer**: backend-agnostic [`secrets::SecretsClient`] trait
//!   with AWS Secrets Manager (feature `aws`), HashiCorp Vault, and
//!   environment-variable backends
//! - **Configuration**: the constants surface the host application relies
//!   on, assembled by [`config::ConfigLoader`] and validated up front
//! - **Bootstrap**: one-shot hand-off to the host application via the
//!   [`bootstrap::HostApp`] trait
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pressroom::bootstrap::{self, ProcessHost};
//! use pressroom::config::ConfigLoader;
//! use pressroom::secrets::EnvVarSecretsClient;
//! use pressroom::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let loader = ConfigLoader::new(EnvVarSecretsClient::new(), "book");
//!     let host = ProcessHost::from_env()?;
//!     bootstrap::launch(&loader, &host).await?;
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{AppConfig, ConfigLoader};
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "pressroom");
    }
}
