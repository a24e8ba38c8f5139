//! Color themes
//!
//! Remote terminals have unknown backgrounds, so the palette is chosen at
//! startup rather than detected.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

/// Color theme applied to every session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light text on a dark background.
    #[default]
    Dark,
    /// Dark text on a light background.
    Light,
}

/// Unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`, expected `dark` or `light`")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

impl Theme {
    /// Body text.
    pub fn text(self) -> Style {
        match self {
            Self::Dark => Style::default().fg(Color::White),
            Self::Light => Style::default().fg(Color::Black),
        }
    }

    /// Secondary text such as descriptions and hints.
    pub fn muted(self) -> Style {
        match self {
            Self::Dark => Style::default().fg(Color::DarkGray),
            Self::Light => Style::default().fg(Color::Gray),
        }
    }

    /// Headings and the active tab.
    pub fn accent(self) -> Style {
        let color = match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Blue,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Highlighted list entry.
    pub fn highlight(self) -> Style {
        match self {
            Self::Dark => Style::default().fg(Color::Black).bg(Color::Cyan),
            Self::Light => Style::default().fg(Color::White).bg(Color::Blue),
        }
    }

    /// Status bar background.
    pub fn status_bar(self) -> Style {
        match self {
            Self::Dark => Style::default().bg(Color::DarkGray).fg(Color::White),
            Self::Light => Style::default().bg(Color::Gray).fg(Color::Black),
        }
    }

    /// Error text in the status bar.
    pub fn error(self) -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    /// Confirmation text.
    pub fn success(self) -> Style {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }
}
