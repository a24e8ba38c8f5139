//! Input decoding for remote terminals.
//!
//! Turns the raw byte stream of a telnet-style connection into
//! [`AppEvent`]s: telnet commands are stripped (window size reports become
//! [`AppEvent::Resize`]), ANSI escape sequences become navigation keys and
//! UTF-8 text becomes characters.
//!
//! The decoder is incremental. Sequences split across reads are buffered
//! until complete, with one exception: a lone ESC at the end of a read is an
//! Escape key press. A sequence still incomplete after
//! [`MAX_SEQUENCE_LEN`] bytes is discarded.

use termfolio_app::{AppEvent, KeyInput};

/// Interpret As Command.
pub const IAC: u8 = 255;
/// Option negotiation: sender will perform the option.
pub const WILL: u8 = 251;
/// Option negotiation: ask the peer to perform the option.
pub const DO: u8 = 253;
/// Subnegotiation begin.
pub const SB: u8 = 250;
/// Subnegotiation end.
pub const SE: u8 = 240;
/// Echo option.
pub const OPT_ECHO: u8 = 1;
/// Suppress Go Ahead option.
pub const OPT_SGA: u8 = 3;
/// Negotiate About Window Size option.
pub const OPT_NAWS: u8 = 31;

/// Widest window accepted from a size report.
pub const MAX_COLS: u16 = 500;
/// Tallest window accepted from a size report.
pub const MAX_ROWS: u16 = 200;
/// Longest incomplete sequence kept while waiting for more bytes.
pub const MAX_SEQUENCE_LEN: usize = 64;

const WONT: u8 = 252;
const DONT: u8 = 254;
const IP: u8 = 244;

const ESC: u8 = 0x1b;
const CR: u8 = b'\r';
const LF: u8 = b'\n';
const NUL: u8 = 0;

/// Outcome of decoding at one position.
enum Step {
    /// Produced an event and consumed this many bytes.
    Event(AppEvent, usize),
    /// Consumed this many bytes without an event.
    Skip(usize),
    /// Need more bytes.
    Incomplete,
}

/// Incremental decoder for one connection.
#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: Vec<u8>,
    after_cr: bool,
}

impl InputDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` read from the connection.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<AppEvent> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.pending.len() {
            let byte = self.pending[pos];

            if self.after_cr && matches!(byte, LF | NUL) {
                self.after_cr = false;
                pos += 1;
                continue;
            }
            self.after_cr = byte == CR;

            match decode(&self.pending[pos..]) {
                Step::Event(event, used) => {
                    events.push(event);
                    pos += used;
                },
                Step::Skip(used) => pos += used,
                Step::Incomplete if self.pending.len() - pos == 1 && byte == ESC => {
                    events.push(AppEvent::Key(KeyInput::Esc));
                    pos += 1;
                },
                Step::Incomplete if self.pending.len() - pos > MAX_SEQUENCE_LEN => {
                    tracing::debug!(len = self.pending.len() - pos, "discarding overlong sequence");
                    pos = self.pending.len();
                },
                Step::Incomplete => break,
            }
        }

        self.pending.drain(..pos);
        events
    }

    /// Bytes buffered while waiting for the rest of a sequence.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

fn decode(bytes: &[u8]) -> Step {
    match bytes[0] {
        IAC => decode_telnet(bytes),
        ESC => decode_escape(bytes),
        CR | LF => Step::Event(key(KeyInput::Enter), 1),
        0x7f | 0x08 => Step::Event(key(KeyInput::Backspace), 1),
        b'\t' => Step::Event(key(KeyInput::Tab), 1),
        ctrl @ 0x01..=0x1a => Step::Event(key(KeyInput::Ctrl(char::from(b'a' + ctrl - 1))), 1),
        0x20..=0x7e => Step::Event(key(KeyInput::Char(char::from(bytes[0]))), 1),
        0x80..=0xff => decode_utf8(bytes),
        _ => Step::Skip(1),
    }
}

fn decode_telnet(bytes: &[u8]) -> Step {
    let Some(&command) = bytes.get(1) else {
        return Step::Incomplete;
    };

    match command {
        WILL | WONT | DO | DONT => {
            if bytes.len() < 3 {
                Step::Incomplete
            } else {
                Step::Skip(3)
            }
        },
        SB => decode_subnegotiation(bytes),
        IP => Step::Event(key(KeyInput::Ctrl('c')), 2),
        _ => Step::Skip(2),
    }
}

/// Decode `IAC SB <option> <data> IAC SE`.
///
/// Window sizes are clamped to [`MAX_COLS`] x [`MAX_ROWS`].
fn decode_subnegotiation(bytes: &[u8]) -> Step {
    let Some(&option) = bytes.get(2) else {
        return Step::Incomplete;
    };

    let mut data = Vec::new();
    let mut i = 3;
    let used = loop {
        match bytes.get(i..i + 2) {
            Some([IAC, IAC]) => {
                data.push(IAC);
                i += 2;
            },
            Some([IAC, SE]) => break i + 2,
            Some([byte, _]) => {
                data.push(*byte);
                i += 1;
            },
            _ => return Step::Incomplete,
        }
    };

    match (option, data.as_slice()) {
        (OPT_NAWS, [w0, w1, h0, h1, ..]) => {
            let cols = u16::from_be_bytes([*w0, *w1]).min(MAX_COLS);
            let rows = u16::from_be_bytes([*h0, *h1]).min(MAX_ROWS);
            Step::Event(AppEvent::Resize(cols, rows), used)
        },
        _ => Step::Skip(used),
    }
}

fn decode_escape(bytes: &[u8]) -> Step {
    match bytes.get(1) {
        None => Step::Incomplete,
        Some(b'[') => decode_csi(bytes),
        Some(b'O') => match bytes.get(2) {
            None => Step::Incomplete,
            Some(&final_byte) => {
                cursor_key(final_byte).map_or(Step::Skip(3), |k| Step::Event(key(k), 3))
            },
        },
        Some(_) => Step::Event(key(KeyInput::Esc), 1),
    }
}

/// Decode `ESC [ <params> <final>`.
fn decode_csi(bytes: &[u8]) -> Step {
    let Some(offset) = bytes[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Step::Incomplete;
    };
    let end = offset + 2;
    let used = end + 1;
    let params = &bytes[2..end];

    let decoded = match bytes[end] {
        b'~' => tilde_key(params),
        final_byte => cursor_key(final_byte),
    };
    decoded.map_or(Step::Skip(used), |k| Step::Event(key(k), used))
}

fn cursor_key(final_byte: u8) -> Option<KeyInput> {
    match final_byte {
        b'A' => Some(KeyInput::Up),
        b'B' => Some(KeyInput::Down),
        b'C' => Some(KeyInput::Right),
        b'D' => Some(KeyInput::Left),
        b'H' => Some(KeyInput::Home),
        b'F' => Some(KeyInput::End),
        _ => None,
    }
}

fn tilde_key(params: &[u8]) -> Option<KeyInput> {
    let first = params.split(|b| *b == b';').next()?;
    match first {
        b"1" | b"7" => Some(KeyInput::Home),
        b"3" => Some(KeyInput::Delete),
        b"4" | b"8" => Some(KeyInput::End),
        b"5" => Some(KeyInput::PageUp),
        b"6" => Some(KeyInput::PageDown),
        _ => None,
    }
}

fn decode_utf8(bytes: &[u8]) -> Step {
    let len = match bytes[0] {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Step::Skip(1),
    };
    let Some(encoded) = bytes.get(..len) else {
        return Step::Incomplete;
    };

    match std::str::from_utf8(encoded).ok().and_then(|s| s.chars().next()) {
        Some(c) => Step::Event(key(KeyInput::Char(c)), len),
        None => Step::Skip(1),
    }
}

fn key(input: KeyInput) -> AppEvent {
    AppEvent::Key(input)
}
