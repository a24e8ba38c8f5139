//! Session state machine.
//!
//! This module defines the [`App`] state machine, which manages everything a
//! single connected visitor sees, completely decoupled from the terminal
//! protocol and the shared mailbox.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the active [`Screen`] and switches on navigation keys.
//! - Owns list highlight/filter state and the scrollable viewport.
//! - Runs the compose flow (body, name, sent) and emits submissions.
//! - Stores terminal dimensions to handle resize events.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use termfolio_core::{ANONYMOUS_SENDER, Project};

use crate::{
    AppAction, AppEvent, Catalog, ComposeStage, DisplayItem, KeyInput, ListKind, ListState,
    Screen, StaticKind, Viewport, blog,
    state::{CHROME_COLS, CHROME_ROWS},
};

/// Longest accepted sender name, in characters.
pub const MAX_NAME_LEN: usize = 32;

const SMALL_STEP: u16 = 1;
const LARGE_STEP: u16 = 10;
const MIN_BLOG_POSTS: usize = 3;
const MAX_BLOG_POSTS: usize = 5;

/// Session state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable with scripted input.
#[derive(Debug, Clone)]
pub struct App {
    /// User name reported by the transport.
    username: String,
    /// Sender name attached to submitted messages.
    display_name: String,
    /// Active screen.
    screen: Screen,
    /// Content shared by all sessions.
    catalog: Arc<Catalog>,
    /// Item list highlight and filter.
    list: ListState,
    /// Scrollable area for detail and static screens.
    viewport: Viewport,
    /// Message body being composed.
    draft: String,
    /// Name being edited. Only meaningful in `ComposeStage::EditingName`.
    name_field: String,
    /// Source for placeholder blog posts.
    rng: StdRng,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a session for `username` starting on the home screen.
    ///
    /// `seed` drives placeholder content generation so sessions are
    /// reproducible in tests.
    pub fn new(username: impl Into<String>, catalog: Arc<Catalog>, seed: u64) -> Self {
        let terminal_size = (80, 24);
        let (width, height) = viewport_size(terminal_size);
        Self {
            username: username.into(),
            display_name: ANONYMOUS_SENDER.to_string(),
            screen: Screen::Home,
            catalog,
            list: ListState::default(),
            viewport: Viewport::new(width, height),
            draft: String::new(),
            name_field: String::new(),
            rng: StdRng::seed_from_u64(seed),
            terminal_size,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                let (width, height) = viewport_size(self.terminal_size);
                self.viewport.resize(width, height);
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Handle keyboard input.
    ///
    /// Editing states capture plain characters before any navigation key is
    /// considered; everywhere else navigation keys win.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match self.screen {
            Screen::Compose(ComposeStage::EditingBody) => return self.handle_body_key(key),
            Screen::Compose(ComposeStage::EditingName) => return self.handle_name_key(key),
            Screen::List(_) if self.list.filtering => return self.handle_filter_key(key),
            _ => {},
        }

        if let Some(actions) = self.handle_navigation_key(key) {
            return actions;
        }

        match self.screen {
            Screen::List(kind) => self.handle_list_key(kind, key),
            Screen::Detail { kind, .. } if key == KeyInput::Backspace => {
                self.list.reset();
                self.screen = Screen::List(kind);
                vec![AppAction::Render]
            },
            Screen::Detail { .. } | Screen::Static(_) => self.handle_scroll_key(key),
            Screen::Home | Screen::Compose(_) => vec![],
        }
    }

    /// Keys that work from every non-editing screen.
    fn handle_navigation_key(&mut self, key: KeyInput) -> Option<Vec<AppAction>> {
        let actions = match key {
            KeyInput::Char('q') | KeyInput::Ctrl('c') => self.quit(),
            KeyInput::Char('o') => self.go_home(),
            KeyInput::Char('p') => self.open_list(ListKind::Projects),
            KeyInput::Char('r') => self.open_static(StaticKind::Resume),
            KeyInput::Char('c') => self.open_static(StaticKind::Contact),
            KeyInput::Char('b') => self.open_static(StaticKind::Blog),
            KeyInput::Char('m') => self.start_compose(),
            _ => return None,
        };
        Some(actions)
    }

    fn handle_list_key(&mut self, kind: ListKind, key: KeyInput) -> Vec<AppAction> {
        let visible = self.visible_indices(kind).len();
        match key {
            KeyInput::Char(digit @ '0'..='9') => {
                let position =
                    digit.to_digit(10).and_then(|d| usize::try_from(d).ok()).unwrap_or(usize::MAX);
                self.open_visible(kind, position)
            },
            KeyInput::Enter => self.open_visible(kind, self.list.highlighted),
            KeyInput::Up | KeyInput::Char('k') => {
                self.list.highlighted = self.list.highlighted.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Down | KeyInput::Char('j') => {
                if self.list.highlighted + 1 < visible {
                    self.list.highlighted += 1;
                }
                vec![AppAction::Render]
            },
            KeyInput::Home | KeyInput::Char('g') => {
                self.list.highlighted = 0;
                vec![AppAction::Render]
            },
            KeyInput::End | KeyInput::Char('G') => {
                self.list.highlighted = visible.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Char('/') => {
                self.list.filtering = true;
                self.list.filter.clear();
                self.list.highlighted = 0;
                vec![AppAction::Render]
            },
            KeyInput::Esc if !self.list.filter.is_empty() => {
                self.list.reset();
                vec![AppAction::Render]
            },
            _ => vec![],
        }
    }

    fn handle_filter_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Ctrl('c') => return self.quit(),
            KeyInput::Char(c) => self.list.filter.push(c),
            KeyInput::Backspace => {
                self.list.filter.pop();
            },
            KeyInput::Enter => self.list.filtering = false,
            KeyInput::Esc => self.list.reset(),
            _ => return vec![],
        }
        self.list.highlighted = 0;
        vec![AppAction::Render]
    }

    fn handle_scroll_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Down | KeyInput::Char('j') => self.viewport.scroll_down(SMALL_STEP),
            KeyInput::Up | KeyInput::Char('k') => self.viewport.scroll_up(SMALL_STEP),
            KeyInput::PageDown | KeyInput::Char('d') => self.viewport.scroll_down(LARGE_STEP),
            KeyInput::PageUp | KeyInput::Char('u') => self.viewport.scroll_up(LARGE_STEP),
            KeyInput::Home | KeyInput::Char('g') => self.viewport.scroll_to_top(),
            KeyInput::End | KeyInput::Char('G') => self.viewport.scroll_to_bottom(),
            _ => return vec![],
        }
        vec![AppAction::Render]
    }

    fn handle_body_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Ctrl('c') => self.quit(),
            KeyInput::Ctrl('n') => {
                self.name_field.clone_from(&self.display_name);
                self.screen = Screen::Compose(ComposeStage::EditingName);
                vec![AppAction::Render]
            },
            KeyInput::Ctrl('s') => self.submit(),
            KeyInput::Esc => self.go_home(),
            KeyInput::Char(c) => {
                self.draft.push(c);
                vec![AppAction::Render]
            },
            KeyInput::Enter => {
                self.draft.push('\n');
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                self.draft.pop();
                vec![AppAction::Render]
            },
            _ => vec![],
        }
    }

    fn handle_name_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Ctrl('c') => self.quit(),
            KeyInput::Enter | KeyInput::Esc => {
                let name = self.name_field.trim();
                if !name.is_empty() {
                    self.display_name = name.to_string();
                }
                self.name_field.clear();
                self.screen = Screen::Compose(ComposeStage::EditingBody);
                vec![AppAction::Render]
            },
            KeyInput::Char(c) => {
                if self.name_field.chars().count() < MAX_NAME_LEN {
                    self.name_field.push(c);
                }
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                self.name_field.pop();
                vec![AppAction::Render]
            },
            _ => vec![],
        }
    }

    /// Submit the draft if it has any content.
    ///
    /// A blank draft is ignored: no submission, no state change.
    fn submit(&mut self) -> Vec<AppAction> {
        let body = self.draft.trim();
        if body.is_empty() {
            return vec![];
        }

        let action =
            AppAction::SubmitMessage { sender: self.display_name.clone(), body: body.to_string() };
        self.draft.clear();
        self.screen = Screen::Compose(ComposeStage::Sent);
        vec![action, AppAction::Render]
    }

    /// End the session.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Switch to the home screen, discarding any draft.
    pub fn go_home(&mut self) -> Vec<AppAction> {
        self.navigate(Screen::Home);
        vec![AppAction::Render]
    }

    /// Switch to a list, clearing highlight and filter.
    pub fn open_list(&mut self, kind: ListKind) -> Vec<AppAction> {
        self.navigate(Screen::List(kind));
        self.list.reset();
        vec![AppAction::Render]
    }

    /// Switch to a static page and load its text into the viewport.
    pub fn open_static(&mut self, kind: StaticKind) -> Vec<AppAction> {
        let content = match kind {
            StaticKind::Resume => self.catalog.resume().to_string(),
            StaticKind::Contact => self.catalog.contact().to_string(),
            StaticKind::Blog => {
                let posts = blog::generate_posts(&mut self.rng, MIN_BLOG_POSTS, MAX_BLOG_POSTS);
                blog::render_document(&posts)
            },
        };
        self.navigate(Screen::Static(kind));
        self.viewport.set_content(content);
        vec![AppAction::Render]
    }

    /// Start a fresh message.
    pub fn start_compose(&mut self) -> Vec<AppAction> {
        self.navigate(Screen::Compose(ComposeStage::EditingBody));
        vec![AppAction::Render]
    }

    /// Open the item at `position` among the visible items.
    ///
    /// Out-of-range positions are ignored.
    fn open_visible(&mut self, kind: ListKind, position: usize) -> Vec<AppAction> {
        let Some(&index) = self.visible_indices(kind).get(position) else {
            return vec![];
        };
        let Some(item) = self.items(kind).get(index) else {
            return vec![];
        };

        let content = item.detail().to_string();
        self.navigate(Screen::Detail { kind, index });
        self.viewport.set_content(content);
        vec![AppAction::Render]
    }

    fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
        self.draft.clear();
        self.name_field.clear();
        self.status_message = None;
    }

    /// Indices of items passing the current filter, in list order.
    fn visible_indices(&self, kind: ListKind) -> Vec<usize> {
        let filter = self.list.filter.to_lowercase();
        self.items(kind)
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                filter.is_empty() || item.filter_value().to_lowercase().contains(&filter)
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn items(&self, kind: ListKind) -> &[Project] {
        match kind {
            ListKind::Projects => self.catalog.projects(),
        }
    }

    /// Items of `kind` passing the current filter.
    pub fn visible_items(&self, kind: ListKind) -> Vec<&dyn DisplayItem> {
        let items = self.items(kind);
        self.visible_indices(kind)
            .into_iter()
            .filter_map(|index| items.get(index).map(|item| item as &dyn DisplayItem))
            .collect()
    }

    /// Item opened on the detail screen. `None` on any other screen.
    pub fn selected_item(&self) -> Option<&dyn DisplayItem> {
        match self.screen {
            Screen::Detail { kind, index } => {
                self.items(kind).get(index).map(|item| item as &dyn DisplayItem)
            },
            _ => None,
        }
    }

    /// Active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// User name reported by the transport.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sender name attached to submitted messages.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Message body being composed.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Name being edited.
    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    /// Shared site content.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// List highlight and filter.
    pub fn list_state(&self) -> &ListState {
        &self.list
    }

    /// Scrollable area for detail and static screens.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

/// Inner viewport size for a terminal of the given dimensions.
fn viewport_size((cols, rows): (u16, u16)) -> (u16, u16) {
    (cols.saturating_sub(CHROME_COLS), rows.saturating_sub(CHROME_ROWS))
}
