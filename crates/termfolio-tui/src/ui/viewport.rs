//! Scrollable page
//!
//! Shows the App's viewport content at its current offset.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use termfolio_app::Viewport;

use crate::ui::Theme;

/// Render a scrollable page titled `title`.
pub fn render(frame: &mut Frame, title: &str, viewport: &Viewport, theme: Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .title_bottom(scroll_position(viewport))
        .title_style(theme.accent());

    let paragraph = Paragraph::new(viewport.content())
        .style(theme.text())
        .wrap(Wrap { trim: false })
        .scroll((viewport.offset(), 0))
        .block(block);

    frame.render_widget(paragraph, area);
}

/// Percentage scrolled, or empty when everything fits.
fn scroll_position(viewport: &Viewport) -> String {
    let max = viewport.max_offset();
    if max == 0 {
        return String::new();
    }
    let percent = u32::from(viewport.offset()) * 100 / u32::from(max);
    format!(" {percent}% ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_hidden_for_short_content() {
        let mut viewport = Viewport::new(20, 5);
        viewport.set_content("short".into());

        assert_eq!(scroll_position(&viewport), "");
    }

    #[test]
    fn position_tracks_offset() {
        let mut viewport = Viewport::new(20, 5);
        let lines: Vec<String> = (0..9).map(|n| n.to_string()).collect();
        viewport.set_content(lines.join("\n"));

        assert_eq!(scroll_position(&viewport), " 0% ");
        viewport.scroll_down(2);
        assert_eq!(scroll_position(&viewport), " 50% ");
        viewport.scroll_to_bottom();
        assert_eq!(scroll_position(&viewport), " 100% ");
    }
}
