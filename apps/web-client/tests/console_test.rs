mod common;

use brew_core::ports::{Document, NoticeKind};
use common::Harness;
use web_client::console::{Command, Console};

#[tokio::test]
async fn test_report_shows_each_notice_once() {
    let h = Harness::new();
    let mut console = Console::new(h.ctx, h.doc.clone(), h.browser.clone());

    h.doc.notify("Hola", NoticeKind::Info);
    let first = console.report();
    assert!(first.contains("Info: Hola"));

    assert!(console.execute(Command::Show).await);
    let second = console.report();
    assert!(!second.contains("Hola"));
    assert!(h.doc.notices().is_empty());
}

#[tokio::test]
async fn test_quit_stops_the_console() {
    let h = Harness::new();
    let mut console = Console::new(h.ctx, h.doc.clone(), h.browser.clone());

    assert!(!console.execute(Command::Quit).await);
}
