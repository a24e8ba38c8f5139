//! Remote terminal sessions.
//!
//! Implements the [`Driver`] trait over a byte stream: bytes read from the
//! client are decoded into events, frames rendered by ratatui are written
//! back. All orchestration lives in the generic [`termfolio_app::Runtime`].

use std::{collections::VecDeque, io, net::SocketAddr, sync::Arc};

use termfolio_app::{App, AppEvent, Catalog, Driver, Runtime};
use termfolio_core::Mailbox;
use termfolio_tui::{InputDecoder, RemoteTerminal, TerminalError, Theme};
use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    sync::watch,
};

use crate::telnet::{self, LOGIN_TIMEOUT};

const READ_BUFFER_SIZE: usize = 1024;

/// Session errors. They end only the session that raised them.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Connection I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rendering failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] TerminalError),
}

/// Everything a session needs from the server, shared by all sessions.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Queue that submitted messages go to.
    pub mailbox: Arc<Mailbox>,
    /// Read-only site content.
    pub catalog: Arc<Catalog>,
    /// Color theme.
    pub theme: Theme,
}

/// [`Driver`] for one remote terminal connection.
pub struct SessionDriver<S> {
    stream: S,
    decoder: InputDecoder,
    terminal: RemoteTerminal,
    pending: VecDeque<AppEvent>,
    shutdown: watch::Receiver<bool>,
    buf: [u8; READ_BUFFER_SIZE],
}

impl<S> SessionDriver<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Create a driver over an already negotiated stream.
    ///
    /// `pending` holds events decoded before the session started.
    pub fn new(
        stream: S,
        decoder: InputDecoder,
        terminal: RemoteTerminal,
        pending: VecDeque<AppEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self { stream, decoder, terminal, pending, shutdown, buf: [0; READ_BUFFER_SIZE] }
    }
}

impl<S> Driver for SessionDriver<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    type Error = SessionError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if *self.shutdown.borrow() {
                return Ok(None);
            }

            tokio::select! {
                read = self.stream.read(&mut self.buf) => {
                    let n = read?;
                    if n == 0 {
                        return Ok(None);
                    }
                    let events = self.decoder.feed(&self.buf[..n]);
                    self.pending.extend(events);
                }

                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    async fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let frame = self.terminal.draw(app)?;
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn stop(&mut self) {
        let result = async {
            let restore = self.terminal.leave()?;
            self.stream.write_all(&restore).await?;
            self.stream.shutdown().await?;
            Ok::<(), SessionError>(())
        }
        .await;

        if let Err(e) = result {
            tracing::debug!("failed to restore remote terminal: {e}");
        }
    }
}

/// Serve one connection from handshake to disconnect.
///
/// # Errors
///
/// Returns an error if the connection fails. The error ends only this
/// session.
pub async fn run_session<S>(
    mut stream: S,
    peer: SocketAddr,
    context: SessionContext,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    telnet::negotiate(&mut stream).await?;

    let mut decoder = InputDecoder::new();
    let prompt = tokio::time::timeout(LOGIN_TIMEOUT, telnet::login(&mut stream, &mut decoder));
    let outcome = tokio::select! {
        outcome = prompt => outcome,
        () = stopped(&mut shutdown) => return Ok(()),
    };
    let login = match outcome {
        Ok(Ok(Some(login))) => login,
        Ok(Ok(None)) => {
            tracing::debug!(%peer, "client left before login");
            return Ok(());
        },
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => {
            tracing::info!(%peer, "login timed out");
            return Ok(());
        },
    };

    let (cols, rows) = login.size;
    tracing::info!(%peer, user = %login.username, cols, rows, "session started");

    let mut app = App::new(login.username, context.catalog, session_seed());
    app.handle(AppEvent::Resize(cols, rows));

    let mut terminal = RemoteTerminal::new(cols, rows, context.theme)?;
    stream.write_all(&terminal.enter()?).await?;

    let driver = SessionDriver::new(stream, decoder, terminal, login.pending, shutdown);
    Runtime::new(driver, app, context.mailbox).run().await?;

    tracing::info!(%peer, "session ended");
    Ok(())
}

/// Resolve once shutdown is requested or the server is gone.
async fn stopped(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Seed for a session's placeholder content.
fn session_seed() -> u64 {
    getrandom::u64().unwrap_or_else(|e| {
        tracing::warn!("OS randomness unavailable, using fixed seed: {e}");
        0
    })
}
