//! Session input events.
//!
//! Events come from the connected terminal (keys, geometry changes) and from
//! the runtime reporting the outcome of an action it executed.

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// An action failed.
    Error {
        /// Error description shown in the status line.
        message: String,
    },
}
