//! Session side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// End the session.
    Quit,

    /// Queue a message in the shared mailbox.
    SubmitMessage {
        /// Display name in effect when the message was sent.
        sender: String,
        /// Trimmed, non-blank message text.
        body: String,
    },
}
