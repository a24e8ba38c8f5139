//! Home screen
//!
//! Greets the visitor and lists the section keys.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use termfolio_app::App;

use crate::ui::Theme;

const MENU: [(&str, &str); 7] = [
    ("p", "projects"),
    ("r", "resume"),
    ("c", "contact"),
    ("b", "blog"),
    ("m", "leave a message"),
    ("o", "back home"),
    ("q", "quit"),
];

/// Render the home screen.
pub fn render(frame: &mut Frame, app: &App, theme: Theme, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(format!("Welcome, {}!", app.username()), theme.accent())),
        Line::default(),
    ];
    lines.extend(
        app.catalog().home().lines().map(|line| Line::styled(line.to_string(), theme.text())),
    );
    lines.push(Line::default());
    lines.extend(MENU.iter().map(|(key, label)| {
        Line::from(vec![
            Span::styled(format!("  {key}"), theme.accent()),
            Span::styled(format!("  {label}"), theme.text()),
        ])
    }));

    let block = Block::default().borders(Borders::ALL).title(" Home ");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);

    frame.render_widget(paragraph, area);
}
