//! Shared secret guarding the delivery endpoint.

use std::fmt;

use crate::ConfigError;

/// Non-empty shared secret.
///
/// Set once at startup and read-only afterwards. The value never appears in
/// `Debug` output, so the secret cannot leak through logged configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a configured secret.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingSecret` if `value` is empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self(value))
    }

    /// Whether `provided` is exactly the configured secret.
    ///
    /// Compares every byte instead of stopping at the first mismatch.
    pub fn matches(&self, provided: &str) -> bool {
        let expected = self.0.as_bytes();
        let provided = provided.as_bytes();
        if expected.len() != provided.len() {
            return false;
        }
        expected.iter().zip(provided).fold(0u8, |diff, (a, b)| diff | (a ^ b)) == 0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}
