//! Authenticated pull interface over the [`Mailbox`].
//!
//! Delivery is at-most-once: a message handed to a poller is gone from the
//! mailbox. There is no acknowledgement, so a poller that crashes after
//! receiving a message loses it.

use std::sync::Arc;

use thiserror::Error;

use crate::{Mailbox, Message, Secret};

/// Outcome of an authorized [`DeliveryGateway::take_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The oldest message, now removed from the mailbox.
    Message(Message),
    /// The mailbox was empty. Nothing changed.
    Empty,
}

impl Delivery {
    /// Whether a message was delivered.
    pub fn has_content(&self) -> bool {
        matches!(self, Self::Message(_))
    }
}

/// The provided secret did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unauthorized")]
pub struct Unauthorized;

/// Hands out mailbox entries, oldest first, to callers holding the secret.
#[derive(Debug, Clone)]
pub struct DeliveryGateway {
    mailbox: Arc<Mailbox>,
    secret: Secret,
}

impl DeliveryGateway {
    /// Create a gateway over `mailbox` guarded by `secret`.
    pub fn new(mailbox: Arc<Mailbox>, secret: Secret) -> Self {
        Self { mailbox, secret }
    }

    /// Remove and return the oldest message.
    ///
    /// Peek and removal happen under a single exclusive lock, so two
    /// concurrent callers never receive the same message and never remove a
    /// message other than the one they return.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `provided_secret` does not match. The mailbox is not
    ///   touched.
    pub fn take_next(&self, provided_secret: &str) -> Result<Delivery, Unauthorized> {
        if !self.secret.matches(provided_secret) {
            return Err(Unauthorized);
        }

        Ok(self.mailbox.pop_oldest().map_or(Delivery::Empty, Delivery::Message))
    }

    /// The mailbox this gateway drains.
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.mailbox
    }
}
