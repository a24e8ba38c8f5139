//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary key and resize
//! sequences, including sequences no real terminal would produce.

use std::sync::Arc;

use proptest::prelude::*;
use termfolio_app::{
    App, AppAction, AppEvent, CHROME_COLS, CHROME_ROWS, Catalog, ComposeStage, KeyInput,
    MAX_NAME_LEN, Screen,
};

/// Generate random key presses, biased towards keys with meaning.
fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        4 => prop::sample::select(vec![
            'o', 'p', 'r', 'c', 'b', 'm', 'j', 'k', 'd', 'u',
            'g', 'G', '/', '0', '1', '3', ' ', 'x',
        ])
        .prop_map(KeyInput::Char),
        1 => prop::sample::select(vec!['s', 'n']).prop_map(KeyInput::Ctrl),
        2 => prop::sample::select(vec![
            KeyInput::Enter,
            KeyInput::Backspace,
            KeyInput::Esc,
            KeyInput::Up,
            KeyInput::Down,
            KeyInput::PageUp,
            KeyInput::PageDown,
            KeyInput::Home,
            KeyInput::End,
            KeyInput::Tab,
        ]),
    ]
}

/// Generate random app events. Quit keys are left out so sequences run long.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        10 => key_strategy().prop_map(AppEvent::Key),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
    ]
}

fn new_app(seed: u64) -> App {
    App::new("visitor", Arc::new(Catalog::bundled()), seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Viewport offset never exceeds the scrollable range.
    #[test]
    fn viewport_offset_stays_in_bounds(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 0..120),
    ) {
        let mut app = new_app(seed);
        for event in events {
            app.handle(event);
            prop_assert!(app.viewport().offset() <= app.viewport().max_offset());
        }
    }

    /// Every submission carries a trimmed, non-blank body.
    #[test]
    fn submissions_are_never_blank(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 0..120),
    ) {
        let mut app = new_app(seed);
        for event in events {
            for action in app.handle(event) {
                if let AppAction::SubmitMessage { sender, body } = action {
                    prop_assert!(!body.is_empty());
                    prop_assert_eq!(body.trim(), body.as_str());
                    prop_assert!(!sender.trim().is_empty());
                }
            }
        }
    }

    /// A submission always moves the session to the sent stage.
    #[test]
    fn submission_implies_sent(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 0..120),
    ) {
        let mut app = new_app(seed);
        for event in events {
            let actions = app.handle(event);
            let submitted = actions.iter().any(|a| matches!(a, AppAction::SubmitMessage { .. }));
            if submitted {
                prop_assert_eq!(app.screen(), Screen::Compose(ComposeStage::Sent));
                prop_assert!(app.draft().is_empty());
            }
        }
    }

    /// Quit is never produced without a quit key.
    #[test]
    fn no_quit_without_quit_key(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 0..120),
    ) {
        let mut app = new_app(seed);
        for event in events {
            prop_assert!(!app.handle(event).contains(&AppAction::Quit));
        }
    }

    /// Display name is never blank and never longer than the cap.
    #[test]
    fn display_name_stays_valid(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 0..120),
    ) {
        let mut app = new_app(seed);
        for event in events {
            app.handle(event);
            prop_assert!(!app.display_name().trim().is_empty());
            prop_assert!(app.display_name().chars().count() <= MAX_NAME_LEN);
            prop_assert!(app.name_field().chars().count() <= MAX_NAME_LEN);
        }
    }

    /// Detail screens always point at an existing item.
    #[test]
    fn detail_index_is_valid(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 0..120),
    ) {
        let mut app = new_app(seed);
        for event in events {
            app.handle(event);
            if let Screen::Detail { .. } = app.screen() {
                prop_assert!(app.selected_item().is_some());
            }
        }
    }

    /// Resize always tracks the terminal and sizes the viewport to fit.
    #[test]
    fn resize_sizes_viewport(cols in 0u16..300, rows in 0u16..150) {
        let mut app = new_app(0);
        let actions = app.handle(AppEvent::Resize(cols, rows));

        prop_assert_eq!(actions, vec![AppAction::Render]);
        prop_assert_eq!(app.terminal_size(), (cols, rows));
        prop_assert_eq!(app.viewport().width(), cols.saturating_sub(CHROME_COLS));
        prop_assert_eq!(app.viewport().height(), rows.saturating_sub(CHROME_ROWS));
    }
}
