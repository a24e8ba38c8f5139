//! Driver trait for abstracting session I/O.
//!
//! The [`Driver`] trait decouples the session runtime from the terminal
//! protocol. The server implements it over a remote connection, tests
//! implement it with scripted events, and the generic [`crate::Runtime`]
//! handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the session runtime.
///
/// # Implementations
///
/// - **Server**: Decodes terminal bytes into events, renders with ratatui
///   into the connection
/// - **Tests**: Replays a fixed list of events, records renders
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` once the visitor disconnected or the session must end.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be written to the terminal.
    fn render(&mut self, app: &App) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Restore the terminal and release resources.
    ///
    /// Called exactly once when the session ends, even after an error.
    fn stop(&mut self) -> impl Future<Output = ()> + Send;
}
