mod common;

use serde_json::json;

use brew_core::domain::Page;
use brew_core::ports::{Browser, Method, NoticeKind};
use common::{Harness, admin, player};
use web_client::router;

fn route_rankings(h: &Harness) {
    h.route(
        Method::Get,
        "/api/v1/leaderboard",
        200,
        json!({"leaderboard": [{"user_id": "u1", "detective_name": "Ana", "points": 900}]}),
    );
    h.route(
        Method::Get,
        "/api/v1/leaderboard/current",
        200,
        json!({"leaderboard": [], "case_name": "El Misterio de Tarrazú"}),
    );
}

#[tokio::test]
async fn test_back_returns_to_leaderboard_without_push() {
    let h = Harness::new();
    route_rankings(&h);

    router::navigate_to(&h.ctx, "/leaderboard").await;
    router::navigate_to(&h.ctx, "/order").await;
    let len_before = h.browser.history_len();

    assert!(h.browser.back());
    let shown = router::on_popstate(&h.ctx).await;

    assert_eq!(shown, Page::Leaderboard);
    assert_eq!(h.doc.active_section().as_deref(), Some("leaderboard"));
    assert_eq!(h.browser.history_len(), len_before);
    assert_eq!(h.doc.title(), Page::Leaderboard.title());
}

#[tokio::test]
async fn test_unknown_path_shows_home() {
    let h = Harness::at("/no-such-page");
    let shown = router::resolve(&h.ctx).await;

    assert_eq!(shown, Page::Home);
    assert_eq!(h.doc.active_section().as_deref(), Some("home"));
    assert_eq!(h.doc.title(), Page::Home.title());
}

#[tokio::test]
async fn test_only_one_section_visible() {
    let h = Harness::new();
    route_rankings(&h);

    router::navigate_to(&h.ctx, "/leaderboard").await;

    let visible: Vec<_> = Page::ALL
        .iter()
        .filter(|p| h.doc.is_visible(p.section_id()))
        .collect();
    assert_eq!(visible, vec![&Page::Leaderboard]);
}

#[tokio::test]
async fn test_profile_requires_login() {
    let h = Harness::new();

    let shown = router::navigate_to(&h.ctx, "/profile").await;

    assert_eq!(shown, Page::Home);
    assert_eq!(h.browser.location().path, "/");
    let (message, kind) = h.doc.last_notice().unwrap();
    assert_eq!(kind, NoticeKind::Error);
    assert!(message.contains("iniciar sesión"));
}

#[tokio::test]
async fn test_admin_requires_admin_user() {
    let h = Harness::new();
    h.sign_in(&player());

    let shown = router::navigate_to(&h.ctx, "/admin").await;

    assert_eq!(shown, Page::Home);
    let (message, _) = h.doc.last_notice().unwrap();
    assert!(message.contains("Acceso denegado"));
}

#[tokio::test]
async fn test_admin_user_enters_admin() {
    let h = Harness::new();
    h.sign_in(&admin());

    let shown = router::navigate_to(&h.ctx, "/admin").await;

    assert_eq!(shown, Page::Admin);
    assert_eq!(h.doc.active_section().as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_order_page_toggles_on_session() {
    let h = Harness::new();
    router::navigate_to(&h.ctx, "/order").await;
    assert!(h.doc.is_visible("orderUnauthenticated"));
    assert!(!h.doc.is_visible("orderAuthenticated"));
    assert!(h.stub.requests().is_empty());

    h.sign_in(&player());
    router::navigate_to(&h.ctx, "/order").await;
    assert!(h.doc.is_visible("orderAuthenticated"));
    let link = h.doc.href("whatsappOrderLink").unwrap();
    assert!(link.starts_with("https://wa.me/"));
    assert!(link.contains("ana%40example.com"));
}
