use std::env;
use std::fmt;

/// Source of the HMAC signing secret.
///
/// Consulted on every encode and decode so that a rotated secret is picked up
/// by the next token operation without rebuilding the handler.
pub trait SecretProvider: Send + Sync {
    /// Current secret, or `None` when none is configured.
    fn secret(&self) -> Option<Vec<u8>>;
}

/// Fixed secret supplied at construction.
#[derive(Clone)]
pub struct StaticSecret(Option<Vec<u8>>);

impl StaticSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Some(secret.into()))
    }

    /// A provider that never yields a secret.
    pub fn none() -> Self {
        Self(None)
    }
}

impl SecretProvider for StaticSecret {
    fn secret(&self) -> Option<Vec<u8>> {
        self.0.clone()
    }
}

impl fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticSecret")
            .field(&self.0.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Secret read from a named environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvironmentSecret {
    variable: String,
}

impl EnvironmentSecret {
    /// # Arguments
    /// * `variable` - Name of the environment variable holding the secret
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl SecretProvider for EnvironmentSecret {
    fn secret(&self) -> Option<Vec<u8>> {
        env::var(&self.variable).ok().map(String::into_bytes)
    }
}
