//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.
//!
//! The layout's fixed rows and columns must add up to
//! [`termfolio_app::CHROME_ROWS`] and [`termfolio_app::CHROME_COLS`], which
//! the App uses to size its scrollable viewport.

mod compose;
mod home;
mod list;
mod status;
mod theme;
mod viewport;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Tabs},
};
use termfolio_app::{App, ListKind, Screen, StaticKind};
pub use theme::{ParseThemeError, Theme};

const HEADER_HEIGHT: u16 = 3;
const BODY_MIN_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

const TABS: [&str; 6] = ["h(o)me", "(p)rojects", "(r)esume", "(c)ontact", "(b)log", "(m)essage"];

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, theme: Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, body_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_header(frame, app, theme, *header_area);
    render_body(frame, app, theme, *body_area);
    status::render(frame, app, theme, *status_area);
}

/// Render the section tabs.
fn render_header(frame: &mut Frame, app: &App, theme: Theme, area: Rect) {
    let titles = TABS.iter().map(|title| Line::from(*title));
    let block =
        Block::default().borders(Borders::ALL).title(" termfolio ").title_style(theme.accent());
    let tabs = Tabs::new(titles)
        .select(tab_index(app.screen()))
        .style(theme.muted())
        .highlight_style(theme.accent())
        .block(block);

    frame.render_widget(tabs, area);
}

/// Render the active screen into the bordered body area.
fn render_body(frame: &mut Frame, app: &App, theme: Theme, area: Rect) {
    match app.screen() {
        Screen::Home => home::render(frame, app, theme, area),
        Screen::List(kind) => {
            let items = app.visible_items(kind);
            list::render(frame, list_title(kind), &items, app.list_state(), theme, area);
        },
        Screen::Detail { kind, .. } => {
            let title = app.selected_item().map_or(list_title(kind), |item| item.title());
            viewport::render(frame, title, app.viewport(), theme, area);
        },
        Screen::Static(kind) => {
            viewport::render(frame, static_title(kind), app.viewport(), theme, area);
        },
        Screen::Compose(stage) => compose::render(frame, app, stage, theme, area),
    }
}

fn tab_index(screen: Screen) -> usize {
    match screen {
        Screen::Home => 0,
        Screen::List(ListKind::Projects) | Screen::Detail { kind: ListKind::Projects, .. } => 1,
        Screen::Static(StaticKind::Resume) => 2,
        Screen::Static(StaticKind::Contact) => 3,
        Screen::Static(StaticKind::Blog) => 4,
        Screen::Compose(_) => 5,
    }
}

fn list_title(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Projects => "Projects",
    }
}

fn static_title(kind: StaticKind) -> &'static str {
    match kind {
        StaticKind::Resume => "Resume",
        StaticKind::Contact => "Contact",
        StaticKind::Blog => "Blog",
    }
}
