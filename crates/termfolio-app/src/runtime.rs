//! Generic runtime for session orchestration.
//!
//! The Runtime drives one session's event loop, coordinating between:
//! - [`App`]: session state machine
//! - [`Mailbox`]: queue shared with every other session
//! - [`Driver`]: connection-specific I/O

use std::sync::Arc;

use termfolio_core::Mailbox;

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App, Mailbox, and Driver.
///
/// # Type Parameters
///
/// - `D`: Connection-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
    mailbox: Arc<Mailbox>,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a runtime for one session.
    pub fn new(driver: D, app: App, mailbox: Arc<Mailbox>) -> Self {
        Self { driver, app, mailbox }
    }

    /// Run the event loop until the visitor quits or disconnects.
    ///
    /// 1. Renders the initial screen
    /// 2. Feeds each driver event into the App
    /// 3. Executes the resulting actions
    ///
    /// The driver is stopped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;
        self.driver.stop().await;
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app).await?;

        while let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(());
            }
        }

        tracing::debug!(user = %self.app.username(), "session input closed");
        Ok(())
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app).await?,
                    AppAction::Quit => return Ok(true),
                    AppAction::SubmitMessage { sender, body } => {
                        let body_len = body.len();
                        match self.mailbox.submit(sender.clone(), body) {
                            Ok(()) => {
                                tracing::info!(%sender, body_len, "message queued");
                            },
                            Err(e) => {
                                tracing::warn!(%sender, error = %e, "message rejected");
                                let event = AppEvent::Error { message: e.to_string() };
                                pending_actions.extend(self.app.handle(event));
                            },
                        }
                    },
                }
            }
        }
        Ok(false)
    }
}
