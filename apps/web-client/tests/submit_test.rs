mod common;

use serde_json::{Value, json};

use brew_core::DomainError;
use brew_core::domain::{Category, Page};
use brew_core::ports::{Browser, Document, Method, SelectOption};
use common::{Harness, active_case, catalog, player};
use web_client::AppError;
use web_client::pages::submit::{self, field_id};
use web_client::router;

const ACTIVE_CASE: &str = "/api/v1/cases/active/public";
const CATALOG: &str = "/api/v1/catalog";
const SUBMISSIONS: &str = "/api/v1/submissions";

async fn open_submit(coffee_ids: &[&str]) -> Harness {
    let h = Harness::new();
    h.sign_in(&player());
    h.route(Method::Get, ACTIVE_CASE, 200, active_case(coffee_ids));
    h.route(Method::Get, CATALOG, 200, catalog());

    let shown = router::navigate_to(&h.ctx, "/submit").await;
    assert_eq!(shown, Page::Submit);
    h
}

fn fill_form(h: &Harness) {
    h.doc.set_value(submit::ORDER_ID, "ab12cd");
    for coffee in 1..=4 {
        h.doc.set_value(&field_id(coffee, "region"), "sarchi");
        h.doc.set_value(&field_id(coffee, "variety"), "geisha");
        h.doc.set_value(&field_id(coffee, "process"), "honey");
        h.doc.set_value(&field_id(coffee, "taste_note_1"), " chocolate ");
        h.doc.set_value(&field_id(coffee, "taste_note_2"), "caramelo");
    }
    h.doc.set_value(submit::FAVORITE_COFFEE, "coffee2");
    h.doc.set_value(submit::BREWING_METHOD, "v60");
}

#[tokio::test]
async fn test_region_selects_are_populated() {
    let h = open_submit(&["a", "b", "c", "d"]).await;

    let selects = h.doc.selects_for(Category::Region);
    assert!(selects.len() >= 4);
    for id in selects {
        let options = h.doc.options(&id);
        assert!(options[0].is_placeholder(), "select {}", id);
        let real: Vec<_> = options.iter().filter(|o| !o.is_placeholder()).collect();
        assert_eq!(real, vec![&SelectOption::new("sarchi", "Sarchí")], "select {}", id);
    }
}

#[tokio::test]
async fn test_favorite_offers_one_option_per_coffee() {
    let h = open_submit(&["a", "b", "c", "d"]).await;

    let values: Vec<_> = h
        .doc
        .options(submit::FAVORITE_COFFEE)
        .into_iter()
        .filter(|o| !o.is_placeholder())
        .map(|o| o.value)
        .collect();
    assert_eq!(values, vec!["coffee1", "coffee2", "coffee3", "coffee4"]);
    assert_eq!(h.doc.text(submit::CASE_NAME).as_deref(), Some("El Misterio de Tarrazú"));
}

#[tokio::test]
async fn test_submission_carries_coffee_ids_in_order() {
    let h = open_submit(&["a", "b", "c", "d"]).await;
    h.route(Method::Post, SUBMISSIONS, 201, json!({"score": 350, "accuracy": 0.7}));
    fill_form(&h);

    let result = submit::submit(&h.ctx).await.unwrap();
    assert_eq!(result.score, 350);

    let posts = h.stub.requests_to(Method::Post, SUBMISSIONS);
    assert_eq!(posts.len(), 1);
    let body: Value = serde_json::from_str(posts[0].body.as_deref().unwrap()).unwrap();
    let ids: Vec<_> = body["coffee_answers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|answer| answer["coffee_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert_eq!(body["order_id"], "AB12CD");
    assert_eq!(body["coffee_answers"][0]["taste_note_1"], "chocolate");
    assert_eq!(body["favorite_coffee"], "coffee2");
}

#[tokio::test]
async fn test_success_moves_to_thank_you() {
    let h = open_submit(&["a", "b", "c", "d"]).await;
    h.route(Method::Post, SUBMISSIONS, 201, json!({"score": 350, "accuracy": 0.7}));
    fill_form(&h);

    submit::submit(&h.ctx).await.unwrap();

    assert_eq!(h.browser.location().path, "/thankyou");
    assert_eq!(h.doc.active_section().as_deref(), Some("thankyou"));
    assert_eq!(h.doc.text("thankyouScore").as_deref(), Some("350"));
    assert_eq!(h.doc.text("thankyouAccuracy").as_deref(), Some("70%"));
}

#[tokio::test]
async fn test_incomplete_case_blocks_submission() {
    let h = open_submit(&["a", "b"]).await;
    h.route(Method::Post, SUBMISSIONS, 201, json!({"score": 0, "accuracy": 0.0}));
    fill_form(&h);

    let err = submit::submit(&h.ctx).await.unwrap_err();

    assert!(matches!(err, AppError::Domain(DomainError::IncompleteCase { .. })));
    assert_eq!(h.posts_to(SUBMISSIONS), 0);
    assert!(h.doc.is_visible(submit::ERROR));
    assert!(h.doc.text(submit::ERROR).unwrap().contains("recarga la página"));
}

#[tokio::test]
async fn test_missing_active_case_blocks_submission() {
    let h = Harness::new();
    h.sign_in(&player());
    h.route(Method::Get, CATALOG, 200, catalog());
    router::navigate_to(&h.ctx, "/submit").await;
    fill_form(&h);

    assert!(submit::submit(&h.ctx).await.is_err());
    assert_eq!(h.posts_to(SUBMISSIONS), 0);
    assert_eq!(
        h.doc.text(submit::CASE_NAME).as_deref(),
        Some("No hay un caso activo en este momento")
    );
}

#[tokio::test]
async fn test_server_error_message_is_shown() {
    let h = open_submit(&["a", "b", "c", "d"]).await;
    h.route(
        Method::Post,
        SUBMISSIONS,
        400,
        json!({"error": "Código de orden inválido o ya utilizado"}),
    );
    fill_form(&h);

    assert!(submit::submit(&h.ctx).await.is_err());
    assert_eq!(
        h.doc.text(submit::ERROR).as_deref(),
        Some("Código de orden inválido o ya utilizado")
    );
    assert!(!h.doc.is_disabled(submit::SUBMIT_BUTTON));
    assert_eq!(h.browser.location().path, "/submit");
}

#[tokio::test]
async fn test_scoring_follows_enabled_questions() {
    let h = open_submit(&["a", "b", "c", "d"]).await;
    assert_eq!(h.doc.text(submit::MAX_SCORE).as_deref(), Some("500"));

    let mut none = active_case(&["a", "b", "c", "d"]);
    for (_, flag) in none["case"]["enabled_questions"].as_object_mut().unwrap() {
        *flag = json!(false);
    }
    h.route(Method::Get, ACTIVE_CASE, 200, none);
    router::navigate_to(&h.ctx, "/submit").await;

    assert_eq!(h.doc.text(submit::MAX_SCORE).as_deref(), Some("0"));
    assert!(!h.doc.is_visible(&submit::group_id(&field_id(1, "region"))));
}

#[tokio::test]
async fn test_active_case_from_plain_endpoint() {
    let h = Harness::new();
    h.sign_in(&player());
    let mut case = active_case(&["a", "b", "c", "d"]);
    case["case"]["coffees"][0]["region"] = json!("sarchi");
    h.route(Method::Get, "/api/v1/cases/active", 200, case);
    h.route(Method::Get, CATALOG, 200, catalog());
    h.route(Method::Post, SUBMISSIONS, 201, json!({"score": 200, "accuracy": 0.4}));

    router::navigate_to(&h.ctx, "/submit").await;
    assert_eq!(h.doc.text(submit::CASE_NAME).as_deref(), Some("El Misterio de Tarrazú"));

    fill_form(&h);
    submit::submit(&h.ctx).await.unwrap();

    let posts = h.stub.requests_to(Method::Post, SUBMISSIONS);
    let body: Value = serde_json::from_str(posts[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["coffee_answers"][3]["coffee_id"], "d");
    assert_eq!(h.browser.location().path, "/thankyou");
}
