//! Application layer for termfolio
//!
//! Pure per-connection state machine and generic session runtime. The same
//! [`App`] is driven by a remote terminal in production and by scripted key
//! sequences in tests.
//!
//! # Components
//!
//! - [`App`]: session state machine (screens, list navigation, compose flow)
//! - [`Catalog`]: site content loaded once at startup, read-only afterwards
//! - [`Driver`]: trait for connection-specific I/O
//! - [`Runtime`]: event loop feeding a [`Driver`]'s events into an [`App`]
//!   and executing the resulting [`AppAction`]s

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
pub mod blog;
mod content;
mod driver;
mod event;
mod input;
mod item;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::{App, MAX_NAME_LEN};
pub use blog::BlogPost;
pub use content::Catalog;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use item::DisplayItem;
pub use runtime::Runtime;
pub use state::{
    CHROME_COLS, CHROME_ROWS, ComposeStage, ListKind, ListState, Screen, StaticKind, Viewport,
};
