//! Item list
//!
//! Renders any [`DisplayItem`] collection with a highlight and an optional
//! filter line in the block title.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState as WidgetState},
};
use termfolio_app::{DisplayItem, ListState};

use crate::ui::Theme;

const HIGHLIGHT_SYMBOL: &str = "> ";

/// Render `items` as a selectable list.
///
/// Items are numbered by visible position, matching the digit keys.
pub fn render(
    frame: &mut Frame,
    title: &str,
    items: &[&dyn DisplayItem],
    list: &ListState,
    theme: Theme,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title(block_title(title, list));

    if items.is_empty() {
        let placeholder = ListItem::new(Span::styled("Nothing matches", theme.muted()));
        let empty = List::new([placeholder]).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let entries: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let number = if position < 10 { format!("[{position}] ") } else { "    ".to_string() };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(number, theme.muted()),
                    Span::styled(item.title().to_string(), theme.accent()),
                ]),
                Line::from(Span::styled(format!("    {}", item.description()), theme.muted())),
            ])
        })
        .collect();

    let widget = List::new(entries)
        .block(block)
        .highlight_style(theme.highlight())
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    let mut state = WidgetState::default().with_selected(Some(list.highlighted()));

    frame.render_stateful_widget(widget, area, &mut state);
}

fn block_title(title: &str, list: &ListState) -> String {
    if list.is_filtering() {
        format!(" {title} | filter: /{}_ ", list.filter())
    } else if list.filter().is_empty() {
        format!(" {title} ")
    } else {
        format!(" {title} | filter: /{} ", list.filter())
    }
}
