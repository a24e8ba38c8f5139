//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples the session logic from whatever terminal protocol delivered the
/// bytes, so key sequences can be scripted in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Control chord, e.g. `Ctrl('s')` for ctrl+s. Always lowercase.
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
}
