//! Messages left by visitors.

use chrono::{DateTime, SecondsFormat, Utc};

/// Sender name used until a visitor picks one.
pub const ANONYMOUS_SENDER: &str = "anonymous";

/// Field separator in the delivery wire format.
pub const WIRE_DELIMITER: &str = "---";

/// One submitted note.
///
/// Created when a session confirms the compose flow, owned by the mailbox until
/// delivered, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Free-text display name of the sender.
    pub sender: String,
    /// Message text. Never blank.
    pub body: String,
    /// When the mailbox accepted the message.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether this message was sent by `sender` with exactly `body`.
    ///
    /// `(sender, body)` is a best-effort handle: identical messages are
    /// indistinguishable.
    pub fn matches(&self, sender: &str, body: &str) -> bool {
        self.sender == sender && self.body == body
    }

    /// Delivery wire format: `<sender>---<body>---<timestamp>`.
    ///
    /// The timestamp is RFC 3339 in UTC with second precision. There is no
    /// escaping; a sender or body containing the delimiter is passed through
    /// as-is.
    pub fn to_wire(&self) -> String {
        let timestamp = self.created_at.to_rfc3339_opts(SecondsFormat::Secs, false);
        format!("{}{WIRE_DELIMITER}{}{WIRE_DELIMITER}{timestamp}", self.sender, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: &str, body: &str) -> Message {
        Message {
            sender: sender.into(),
            body: body.into(),
            created_at: DateTime::from_timestamp(1_714_564_800, 0).expect("valid timestamp"),
        }
    }

    #[test]
    fn wire_format_joins_fields_with_delimiter() {
        insta::assert_snapshot!(
            message("alice", "hello").to_wire(),
            @"alice---hello---2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn wire_format_keeps_multiline_bodies() {
        insta::assert_snapshot!(
            message("bob", "line one\nline two").to_wire(),
            @r"
        bob---line one
        line two---2024-05-01T12:00:00+00:00
        "
        );
    }

    #[test]
    fn matches_requires_sender_and_body() {
        let msg = message("alice", "hello");
        assert!(msg.matches("alice", "hello"));
        assert!(!msg.matches("alice", "hello "));
        assert!(!msg.matches("bob", "hello"));
    }
}
