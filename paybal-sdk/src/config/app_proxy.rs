//! App proxy configuration.

/// Shared secret used to verify app proxy query signatures.
#[derive(Clone)]
pub struct AppProxyConfig {
    secret: Box<[u8]>,
}

impl AppProxyConfig {
    pub fn new(secret: impl Into<Box<[u8]>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret key bytes for HMAC verification.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for AppProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppProxyConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}
