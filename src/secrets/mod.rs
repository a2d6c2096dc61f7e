//! Secret retrieval for the configuration bootstrap.
//!
//! This module provides a backend-agnostic interface for fetching the secret
//! bundle the Pressroom bootstrap consumes at startup. Everything is built
//! around the read-only [`SecretsClient`] trait:
//!
//! - **get_secret**: retrieve a secret's string payload
//! - **secret_exists**: check for presence without consuming the value
//!
//! # Supported Backends
//!
//! - **AWS Secrets Manager**: production backend (feature `aws`, default on)
//! - **HashiCorp Vault**: KV v2 engine, for Vault-based deployments
//! - **Environment Variables**: development fallback using the
//!   `PRESSROOM_SECRET_*` prefix
//!
//! Backends compose: [`FallbackSecretsClient`] wraps a primary and a
//! secondary so development machines can run production wiring with
//! environment-provided secrets.
//!
//! # Security Considerations
//!
//! - Secret values are never logged or exposed in error messages
//! - Sensitive configuration fields are carried as [`SecretString`], which
//!   redacts itself in Debug/Display/serialization and zeroes its memory on
//!   drop
//! - The environment backend is for development only

pub mod aws;
pub mod client;
pub mod env;
pub mod error;
pub mod fallback;
pub mod types;
pub mod vault;

// Re-export main types
#[cfg(feature = "aws")]
pub use aws::AwsSecretsManagerClient;
pub use aws::AwsBackendConfig;
pub use client::SecretsClient;
pub use env::EnvVarSecretsClient;
pub use error::{Result, SecretsError};
pub use fallback::FallbackSecretsClient;
pub use types::SecretString;
pub use vault::{VaultConfig, VaultSecretsClient};
