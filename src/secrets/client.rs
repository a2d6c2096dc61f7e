//! Core secrets client trait.

use async_trait::async_trait;

use super::error::Result;

/// Trait for read-only secret retrieval backends.
///
/// The configuration loader only ever reads: it fetches one named bundle at
/// startup and never writes, rotates, or deletes. Backends therefore expose
/// a deliberately small surface.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret values
/// - Network communication MUST use TLS
///
/// # Example Implementation
///
/// ```rust,ignore
/// use pressroom::secrets::{SecretsClient, Result};
/// use async_trait::async_trait;
///
/// struct MySecretsBackend;
///
/// #[async_trait]
/// impl SecretsClient for MySecretsBackend {
///     async fn get_secret(&self, key: &str) -> Result<String> {
///         // Fetch from backend
///         Ok("secret-value".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait SecretsClient: Send + Sync {
    /// Retrieve a secret's string payload by key.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`] if the secret doesn't exist
    /// - [`SecretsError::ConnectionFailed`] if the backend is unreachable
    /// - [`SecretsError::AuthenticationFailed`] if auth fails
    ///
    /// [`SecretsError::NotFound`]: super::SecretsError::NotFound
    /// [`SecretsError::ConnectionFailed`]: super::SecretsError::ConnectionFailed
    /// [`SecretsError::AuthenticationFailed`]: super::SecretsError::AuthenticationFailed
    async fn get_secret(&self, key: &str) -> Result<String>;

    /// Check if a secret exists.
    ///
    /// The default implementation fetches the secret and discards the value;
    /// backends with a cheaper existence check should override it.
    async fn secret_exists(&self, key: &str) -> Result<bool> {
        match self.get_secret(key).await {
            Ok(_) => Ok(true),
            Err(super::error::SecretsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// Allow runtime backend selection (AWS vs Vault vs env) behind one loader
// type.
#[async_trait]
impl SecretsClient for Box<dyn SecretsClient> {
    async fn get_secret(&self, key: &str) -> Result<String> {
        (**self).get_secret(key).await
    }

    async fn secret_exists(&self, key: &str) -> Result<bool> {
        (**self).secret_exists(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::error::SecretsError;

    struct SingleSecret;

    #[async_trait]
    impl SecretsClient for SingleSecret {
        async fn get_secret(&self, key: &str) -> Result<String> {
            if key == "book" {
                Ok("{}".to_string())
            } else {
                Err(SecretsError::not_found(key))
            }
        }
    }

    #[tokio::test]
    async fn test_default_secret_exists() {
        let client = SingleSecret;
        assert!(client.secret_exists("book").await.unwrap());
        assert!(!client.secret_exists("missing").await.unwrap());
    }
}
