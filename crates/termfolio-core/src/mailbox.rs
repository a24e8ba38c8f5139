//! Process-wide message queue.
//!
//! The [`Mailbox`] is written by interactive sessions and drained by the
//! delivery gateway. Access follows a shared/exclusive discipline: peeks run
//! concurrently with each other, every mutation excludes all other access.
//!
//! # Invariants
//!
//! - Entries are kept in arrival order and leave oldest-first.
//! - No entry has a blank body.
//! - A removal takes out at most one entry.

use std::{
    collections::VecDeque,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{Clock, MailboxError, Message, SystemClock};

/// Shared FIFO of submitted messages.
///
/// Constructed once at startup and handed by `Arc` to every session and to
/// the delivery gateway. Messages live in memory only and are lost on
/// restart.
pub struct Mailbox {
    entries: RwLock<VecDeque<Message>>,
    clock: Box<dyn Clock>,
}

impl Mailbox {
    /// Create an empty mailbox stamping messages with the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty mailbox with a custom time source.
    pub fn with_clock(clock: impl Clock) -> Self {
        Self { entries: RwLock::new(VecDeque::new()), clock: Box::new(clock) }
    }

    /// Append a message from `sender`.
    ///
    /// The timestamp is taken while holding the write lock, so timestamps are
    /// non-decreasing in queue order as long as the clock is.
    ///
    /// # Errors
    ///
    /// - `MailboxError::EmptyBody` if `body` is blank. Nothing is stored.
    pub fn submit(
        &self,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<(), MailboxError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(MailboxError::EmptyBody);
        }

        let sender = sender.into();
        let mut entries = self.write();
        let created_at = self.clock.now();
        tracing::debug!(%sender, body_len = body.len(), "message queued");
        entries.push_back(Message { sender, body, created_at });

        Ok(())
    }

    /// Copy of the oldest message. `None` if the mailbox is empty.
    pub fn peek_oldest(&self) -> Option<Message> {
        self.read().front().cloned()
    }

    /// Remove the first message matching `sender` and `body`, scanning in
    /// arrival order.
    ///
    /// Returns whether a message was removed. Identical messages are
    /// indistinguishable; only one is removed per call.
    pub fn remove_by_identity(&self, sender: &str, body: &str) -> bool {
        let mut entries = self.write();
        let Some(index) = entries.iter().position(|m| m.matches(sender, body)) else {
            return false;
        };
        entries.remove(index).is_some()
    }

    /// Remove and return the oldest message in one exclusive step.
    ///
    /// `None` if the mailbox is empty.
    pub fn pop_oldest(&self) -> Option<Message> {
        self.write().pop_front()
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no messages are queued.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every mutation is a single VecDeque call, so a panicking holder cannot
    // leave the queue half-updated and poisoning is safe to ignore.
    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Message>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Message>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox").field("len", &self.len()).finish_non_exhaustive()
    }
}
