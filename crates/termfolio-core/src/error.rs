//! Error types for the core crate.

use thiserror::Error;

/// Errors returned by [`Mailbox`](crate::Mailbox) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailboxError {
    /// Message body was empty or whitespace-only.
    ///
    /// Callers are expected to reject these before reaching the mailbox; the
    /// mailbox refuses them anyway and stays unchanged.
    #[error("message body is empty")]
    EmptyBody,
}

/// Configuration errors. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The delivery secret is absent or blank.
    ///
    /// Starting without one would leave the delivery endpoint open to anyone.
    #[error("delivery secret is not configured")]
    MissingSecret,
}
