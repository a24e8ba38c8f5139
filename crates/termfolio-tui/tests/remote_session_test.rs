//! End-to-end tests for the remote terminal pipeline.
//!
//! Raw client bytes go through the decoder into an App, and the App is
//! rendered back into escape sequences, without any network I/O.

use std::sync::Arc;

use termfolio_app::{App, AppAction, Catalog, ComposeStage, Screen};
use termfolio_tui::{
    InputDecoder, RemoteTerminal, Theme,
    decoder::{MAX_COLS, MAX_ROWS},
};

fn feed(app: &mut App, decoder: &mut InputDecoder, bytes: &[u8]) -> Vec<AppAction> {
    decoder.feed(bytes).into_iter().flat_map(|event| app.handle(event)).collect()
}

#[test]
fn typed_message_is_submitted() {
    let mut app = App::new("visitor", Arc::new(Catalog::bundled()), 0);
    let mut decoder = InputDecoder::new();

    let actions = feed(&mut app, &mut decoder, b"mhello\r\nthere\x13");

    let submitted: Vec<_> = actions
        .into_iter()
        .filter(|action| matches!(action, AppAction::SubmitMessage { .. }))
        .collect();
    assert_eq!(submitted, [AppAction::SubmitMessage {
        sender: "anonymous".into(),
        body: "hello\nthere".into(),
    }]);
    assert_eq!(app.screen(), Screen::Compose(ComposeStage::Sent));
}

#[test]
fn window_size_report_resizes_rendering() {
    let mut app = App::new("visitor", Arc::new(Catalog::bundled()), 0);
    let mut decoder = InputDecoder::new();
    let mut terminal = RemoteTerminal::new(80, 24, Theme::Dark).unwrap();
    terminal.draw(&app).unwrap();

    feed(&mut app, &mut decoder, &[255, 250, 31, 0, 132, 0, 43, 255, 240]);
    terminal.draw(&app).unwrap();

    assert_eq!(app.terminal_size(), (132, 43));
    assert_eq!(terminal.size(), (132, 43));
}

#[test]
fn arrow_keys_navigate_projects() {
    let mut app = App::new("visitor", Arc::new(Catalog::bundled()), 0);
    let mut decoder = InputDecoder::new();

    feed(&mut app, &mut decoder, b"p\x1b[B\x1b[B\r");

    assert!(matches!(app.screen(), Screen::Detail { index: 2, .. }));

    let mut terminal = RemoteTerminal::new(80, 24, Theme::Dark).unwrap();
    let output = terminal.draw(&app).unwrap();
    assert!(String::from_utf8_lossy(&output).contains("Key-value"));
}

#[test]
fn hostile_window_size_is_clamped_before_rendering() {
    let mut app = App::new("visitor", Arc::new(Catalog::bundled()), 0);
    let mut decoder = InputDecoder::new();
    let mut terminal = RemoteTerminal::new(80, 24, Theme::Dark).unwrap();

    feed(&mut app, &mut decoder, &[255, 250, 31, 0xff, 0xfe, 0xff, 0xfe, 255, 240]);
    terminal.draw(&app).unwrap();

    assert_eq!(app.terminal_size(), (MAX_COLS, MAX_ROWS));
    assert_eq!(terminal.size(), (MAX_COLS, MAX_ROWS));
}
