//! Telnet handshake and login prompt.
//!
//! The server asks the client for character-at-a-time mode with server-side
//! echo and window size reports, then reads a username. The name is only a
//! label for the session; no credentials are checked.

use std::{collections::VecDeque, io, time::Duration};

use termfolio_app::{AppEvent, KeyInput};
use termfolio_core::ANONYMOUS_SENDER;
use termfolio_tui::{
    InputDecoder,
    decoder::{DO, IAC, OPT_ECHO, OPT_NAWS, OPT_SGA, WILL},
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 32;

/// How long a client may take to enter a username.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Geometry assumed until the client reports its window size.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

const PROMPT: &[u8] = b"login: ";
const NEGOTIATION: [u8; 9] = [IAC, WILL, OPT_ECHO, IAC, WILL, OPT_SGA, IAC, DO, OPT_NAWS];

/// Result of a completed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    /// Entered name, or [`ANONYMOUS_SENDER`] if left empty.
    pub username: String,
    /// Last window size reported by the client.
    pub size: (u16, u16),
    /// Events that arrived after the name was submitted.
    pub pending: VecDeque<AppEvent>,
}

/// Send the option negotiation that opens every session.
pub async fn negotiate<S>(stream: &mut S) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(&NEGOTIATION).await?;
    stream.flush().await
}

/// Prompt for a username, echoing input.
///
/// Returns `None` if the client disconnects or presses ctrl+c/ctrl+d before
/// submitting a name.
pub async fn login<S>(stream: &mut S, decoder: &mut InputDecoder) -> io::Result<Option<Login>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(PROMPT).await?;
    stream.flush().await?;

    let mut name = String::new();
    let mut size = DEFAULT_SIZE;
    let mut buf = [0u8; 512];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }

        let mut events: VecDeque<AppEvent> = decoder.feed(&buf[..n]).into();
        let mut echo = Vec::new();

        while let Some(event) = events.pop_front() {
            match event {
                AppEvent::Resize(cols, rows) => size = (cols, rows),
                AppEvent::Key(KeyInput::Enter) => {
                    echo.extend_from_slice(b"\r\n");
                    stream.write_all(&echo).await?;

                    let trimmed = name.trim();
                    let username =
                        if trimmed.is_empty() { ANONYMOUS_SENDER } else { trimmed }.to_string();
                    return Ok(Some(Login { username, size, pending: events }));
                },
                AppEvent::Key(KeyInput::Ctrl('c' | 'd')) => return Ok(None),
                AppEvent::Key(KeyInput::Backspace) => {
                    if name.pop().is_some() {
                        echo.extend_from_slice(b"\x08 \x08");
                    }
                },
                AppEvent::Key(KeyInput::Char(c)) => {
                    if name.chars().count() < MAX_USERNAME_LEN {
                        name.push(c);
                        let mut encoded = [0u8; 4];
                        echo.extend_from_slice(c.encode_utf8(&mut encoded).as_bytes());
                    }
                },
                AppEvent::Key(_) | AppEvent::Error { .. } => {},
            }
        }

        if !echo.is_empty() {
            stream.write_all(&echo).await?;
            stream.flush().await?;
        }
    }
}
