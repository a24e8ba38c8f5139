//! Status bar
//!
//! Shows the last error if there is one, otherwise the keys that work on
//! the current screen.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use termfolio_app::{App, ComposeStage, Screen};

use crate::ui::Theme;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, theme: Theme, area: Rect) {
    let content = match app.status_message() {
        Some(message) => Span::styled(message.to_string(), theme.error()),
        None => Span::raw(hints(app)),
    };

    let paragraph =
        Paragraph::new(Line::from(vec![Span::raw(" "), content])).style(theme.status_bar());

    frame.render_widget(paragraph, area);
}

fn hints(app: &App) -> &'static str {
    match app.screen() {
        Screen::Home => "o p r c b m: sections | q: quit",
        Screen::List(_) if app.list_state().is_filtering() => {
            "type to filter | enter: keep | esc: clear"
        },
        Screen::List(_) => "j/k: move | 0-9/enter: open | /: filter | q: quit",
        Screen::Detail { .. } => "j/k d/u g/G: scroll | backspace: back | q: quit",
        Screen::Static(_) => "j/k d/u g/G: scroll | q: quit",
        Screen::Compose(ComposeStage::EditingBody) => {
            "ctrl+s: send | ctrl+n: change name | esc: discard"
        },
        Screen::Compose(ComposeStage::EditingName) => "enter: keep name | ctrl+c: quit",
        Screen::Compose(ComposeStage::Sent) => "m: new message | o: home | q: quit",
    }
}
