mod common;

use serde_json::json;

use brew_core::domain::Page;
use brew_core::ports::{Browser, Method, NoticeKind};
use common::{Harness, admin, player, token};
use web_client::{auth, auth_ui};

const PROFILE: &str = "/api/v1/profile";
const LOGOUT: &str = "/auth/logout";

#[tokio::test]
async fn test_logout_clears_session_and_reloads() {
    let h = Harness::new();
    h.sign_in(&player());
    h.route(Method::Post, LOGOUT, 200, json!({"message": "ok"}));

    auth::logout(&h.ctx).await;

    assert_eq!(h.posts_to(LOGOUT), 1);
    assert!(h.ctx.session.token().is_none());
    assert!(h.ctx.session.user().is_none());
    assert_eq!(h.browser.reload_count(), 1);
}

#[tokio::test]
async fn test_logout_survives_server_failure() {
    let h = Harness::new();
    h.sign_in(&player());
    h.stub.fail(Method::Post, LOGOUT);

    auth::logout(&h.ctx).await;

    assert!(h.ctx.session.token().is_none());
    assert!(h.ctx.session.user().is_none());
    assert_eq!(h.browser.reload_count(), 1);
}

#[tokio::test]
async fn test_logout_when_signed_out_skips_request() {
    let h = Harness::new();

    auth::logout(&h.ctx).await;

    assert_eq!(h.posts_to(LOGOUT), 0);
    assert_eq!(h.browser.reload_count(), 1);
}

#[tokio::test]
async fn test_login_redirects_to_provider() {
    let h = Harness::new();
    h.route(
        Method::Get,
        "/auth/google",
        200,
        json!({"auth_url": "https://accounts.google.com/o/oauth2/auth?state=s1"}),
    );

    auth::login(&h.ctx).await.unwrap();

    assert_eq!(
        h.browser.redirects(),
        vec!["https://accounts.google.com/o/oauth2/auth?state=s1".to_string()]
    );
}

#[tokio::test]
async fn test_login_failure_notifies() {
    let h = Harness::new();
    h.stub.fail(Method::Get, "/auth/google");

    assert!(auth::login(&h.ctx).await.is_err());
    assert_eq!(h.doc.last_notice().map(|(_, kind)| kind), Some(NoticeKind::Error));
    assert!(h.browser.redirects().is_empty());
}

#[tokio::test]
async fn test_oauth_callback_stores_session() {
    let h = Harness::at("/auth/callback?code=abc&state=xyz");
    let user = player();
    h.route(
        Method::Get,
        "/auth/google/callback?code=abc&state=xyz",
        200,
        json!({"token": token(3600), "user": user}),
    );
    h.route(Method::Get, PROFILE, 200, json!(user));

    let shown = auth::boot(&h.ctx).await;

    assert_eq!(shown, Page::Home);
    assert!(h.ctx.session.is_authenticated());
    assert_eq!(h.ctx.session.user().unwrap().name, "Ana");
    assert_eq!(h.browser.location().path, "/");
    assert!(h
        .doc
        .notices()
        .iter()
        .any(|(_, kind)| *kind == NoticeKind::Success));
}

#[tokio::test]
async fn test_oauth_callback_error_param() {
    let h = Harness::at("/auth/callback?error=access_denied");

    auth::boot(&h.ctx).await;

    assert!(h.ctx.session.token().is_none());
    assert_eq!(h.doc.notices()[0].1, NoticeKind::Error);
    assert_eq!(h.browser.location().path, "/");
}

#[tokio::test]
async fn test_oauth_callback_without_token_fails() {
    let h = Harness::at("/auth/callback?code=abc&state=xyz");
    h.route(
        Method::Get,
        "/auth/google/callback?code=abc&state=xyz",
        200,
        json!({"user": player()}),
    );

    auth::boot(&h.ctx).await;

    assert!(!h.ctx.session.is_authenticated());
    assert_eq!(h.doc.notices()[0].1, NoticeKind::Error);
}

#[tokio::test]
async fn test_token_in_fragment_signs_in() {
    let h = Harness::at(&format!("/#token={}", token(3600)));
    h.route(Method::Get, PROFILE, 200, json!(player()));

    let shown = auth::boot(&h.ctx).await;

    assert_eq!(shown, Page::Profile);
    let location = h.browser.location();
    assert_eq!(location.path, "/profile");
    assert!(location.hash.is_empty());
    assert_eq!(h.browser.history_len(), 1);
    assert!(h.ctx.session.is_authenticated());
    assert_eq!(h.ctx.session.user().unwrap().points, 1250);
}

#[tokio::test]
async fn test_sync_shows_admin_entry_for_admins() {
    let h = Harness::new();
    h.sign_in(&admin());
    h.route(Method::Get, PROFILE, 200, json!(admin()));

    auth_ui::sync(&h.ctx).await;

    assert!(!h.doc.is_visible(auth_ui::LOGIN_BUTTON));
    assert!(h.doc.is_visible(auth_ui::USER_DROPDOWN));
    assert!(h.doc.is_visible(auth_ui::ADMIN_MENU_ITEM));
    assert!(h.doc.is_visible(auth_ui::ADMIN_MENU_ITEM_MOBILE));
    assert_eq!(h.doc.text(auth_ui::USER_NAME).as_deref(), Some("Admin"));
}

#[tokio::test]
async fn test_sync_hides_admin_entry_for_players() {
    let h = Harness::new();
    h.sign_in(&player());
    h.route(Method::Get, PROFILE, 200, json!(player()));

    auth_ui::sync(&h.ctx).await;

    assert!(h.doc.is_visible(auth_ui::SUBMIT_MENU_ITEM));
    assert!(!h.doc.is_visible(auth_ui::ADMIN_MENU_ITEM));
}

#[tokio::test]
async fn test_rejected_token_signs_out() {
    let h = Harness::new();
    h.sign_in(&player());
    h.route(Method::Get, PROFILE, 401, json!({"error": "Invalid token"}));

    auth_ui::sync(&h.ctx).await;

    assert!(h.ctx.session.token().is_none());
    assert!(h.doc.is_visible(auth_ui::LOGIN_BUTTON));
    assert!(!h.doc.is_visible(auth_ui::USER_DROPDOWN));
}
