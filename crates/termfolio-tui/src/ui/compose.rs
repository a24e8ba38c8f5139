//! Compose screen
//!
//! Message editor, sender name prompt and the confirmation shown after
//! sending.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use termfolio_app::{App, ComposeStage};

use crate::ui::Theme;

const SENDER_HEIGHT: u16 = 1;
const EDITOR_MIN_HEIGHT: u16 = 1;
const CURSOR: &str = "_";

/// Render the compose flow in its current stage.
pub fn render(frame: &mut Frame, app: &App, stage: ComposeStage, theme: Theme, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Leave a message ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if stage == ComposeStage::Sent {
        render_sent(frame, app, theme, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SENDER_HEIGHT), Constraint::Min(EDITOR_MIN_HEIGHT)])
        .split(inner);

    let [sender_area, editor_area] = chunks.as_ref() else {
        return;
    };

    let sender = match stage {
        ComposeStage::EditingName => Line::from(vec![
            Span::styled("From: ", theme.muted()),
            Span::styled(format!("{}{CURSOR}", app.name_field()), theme.accent()),
        ]),
        _ => Line::from(vec![
            Span::styled("From: ", theme.muted()),
            Span::styled(app.display_name().to_string(), theme.text()),
        ]),
    };
    frame.render_widget(Paragraph::new(sender), *sender_area);

    let mut body = app.draft().to_string();
    if stage == ComposeStage::EditingBody {
        body.push_str(CURSOR);
    }
    let editor = Paragraph::new(body).style(theme.text()).wrap(Wrap { trim: false });
    frame.render_widget(editor, *editor_area);
}

fn render_sent(frame: &mut Frame, app: &App, theme: Theme, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Message sent. Thank you!", theme.success())),
        Line::default(),
        Line::from(Span::styled(format!("Signed as {}.", app.display_name()), theme.text())),
        Line::from(Span::styled("Press m to write another.", theme.muted())),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
