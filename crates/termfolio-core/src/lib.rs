//! Core logic for termfolio
//!
//! Everything here is free of sockets, terminals and async runtimes: the
//! process-wide [`Mailbox`] that collects notes left by visitors, the
//! [`DeliveryGateway`] that hands them to an authenticated poller, and the
//! project record format the site content is loaded from.
//!
//! # Components
//!
//! - [`Mailbox`]: shared FIFO of submitted [`Message`]s behind a read/write lock
//! - [`DeliveryGateway`]: secret-guarded "take next message" operation
//! - [`Secret`]: non-empty shared secret, redacted in debug output
//! - [`Clock`]: time source used to stamp messages
//! - [`projects`]: parser for the delimited project record format

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod clock;
mod error;
mod gateway;
mod mailbox;
mod message;
pub mod projects;
mod secret;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, MailboxError};
pub use gateway::{Delivery, DeliveryGateway, Unauthorized};
pub use mailbox::Mailbox;
pub use message::{ANONYMOUS_SENDER, Message, WIRE_DELIMITER};
pub use projects::Project;
pub use secret::Secret;
