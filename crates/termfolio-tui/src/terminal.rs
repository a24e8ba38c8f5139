//! Remote terminal renderer.
//!
//! Renders App state with ratatui into an in-memory byte buffer instead of
//! the local tty. The caller writes the returned escape sequences to the
//! connection. The viewport is fixed to the size the client reported, so
//! ratatui never queries a local terminal.

use std::io;

use crossterm::{
    cursor::{Hide, Show},
    queue,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal, TerminalOptions, Viewport,
    backend::CrosstermBackend,
    layout::Rect,
};
use termfolio_app::App;
use thiserror::Error;

use crate::ui::{self, Theme};

/// Remote terminal errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Rendering into the frame buffer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Ratatui terminal whose output is collected for a remote client.
pub struct RemoteTerminal {
    terminal: Terminal<CrosstermBackend<Vec<u8>>>,
    theme: Theme,
    size: (u16, u16),
}

impl RemoteTerminal {
    /// Create a terminal for a client of `cols` x `rows`.
    pub fn new(cols: u16, rows: u16, theme: Theme) -> Result<Self, TerminalError> {
        let backend = CrosstermBackend::new(Vec::new());
        let viewport = Viewport::Fixed(Rect::new(0, 0, cols, rows));
        let terminal = Terminal::with_options(backend, TerminalOptions { viewport })?;

        Ok(Self { terminal, theme, size: (cols, rows) })
    }

    /// Bytes that switch the client into the alternate screen.
    pub fn enter(&mut self) -> Result<Vec<u8>, TerminalError> {
        let writer = self.writer();
        queue!(writer, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(self.take_output())
    }

    /// Render `app` and return the bytes to send.
    ///
    /// Follows the App's terminal size; a size change redraws everything.
    pub fn draw(&mut self, app: &App) -> Result<Vec<u8>, TerminalError> {
        let size = app.terminal_size();
        if size != self.size {
            let (cols, rows) = size;
            self.terminal.resize(Rect::new(0, 0, cols, rows))?;
            tracing::debug!(cols, rows, "remote terminal resized");
            self.size = size;
        }

        let theme = self.theme;
        self.terminal.draw(|frame| ui::render(frame, app, theme))?;
        Ok(self.take_output())
    }

    /// Bytes that restore the client's screen.
    pub fn leave(&mut self) -> Result<Vec<u8>, TerminalError> {
        let writer = self.writer();
        queue!(writer, Show, LeaveAlternateScreen)?;
        Ok(self.take_output())
    }

    /// Client dimensions currently rendered for (columns, rows).
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    fn writer(&mut self) -> &mut Vec<u8> {
        self.terminal.backend_mut().writer_mut()
    }

    fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(self.writer())
    }
}
