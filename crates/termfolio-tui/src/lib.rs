//! Terminal UI for termfolio
//!
//! Everything a remote session needs between the socket and the
//! [`termfolio_app::App`]: decoding client bytes into events and rendering
//! App state into escape sequences for the client.
//!
//! This crate performs no network I/O itself.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod decoder;
pub mod terminal;
pub mod ui;

pub use decoder::InputDecoder;
pub use terminal::{RemoteTerminal, TerminalError};
pub use ui::{ParseThemeError, Theme};
