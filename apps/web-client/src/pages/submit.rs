//! Submit page - the active case's answer form.
//!
//! Only coffee ids and question flags of the active case are kept in the
//! context while the form is open; the public endpoint's payload is
//! deserialized into types that have no answer fields.

use brew_core::domain::{
    ActiveCaseView, COFFEES_PER_CASE, Category, CoffeeGuess, EnabledQuestions, Page, PublicCase,
    ScoringInfo, Submission, SubmissionForm, SubmissionResult,
};
use brew_core::ports::{Document, NoticeKind, SelectOption};
use brew_shared::dto::{CaseResponse, SubmissionReceipt};

use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::pages::{self, thankyou};
use crate::router;

pub const CASE_NAME: &str = "activeCaseName";
pub const CASE_DESCRIPTION: &str = "activeCaseDescription";
pub const ORDER_ID: &str = "orderId";
pub const FAVORITE_COFFEE: &str = "favorite_coffee";
pub const BREWING_METHOD: &str = "brewing_method";
pub const MAX_SCORE: &str = "maxScore";
pub const COFFEE_QUESTION_COUNT: &str = "coffeeQuestionCount";
pub const BONUS_QUESTION_COUNT: &str = "bonusQuestionCount";
pub const SUBMIT_BUTTON: &str = "submitBtn";
pub const SUCCESS: &str = "submitSuccess";
pub const ERROR: &str = "submitError";

/// Per-coffee questions, in form order.
pub const COFFEE_KEYS: [&str; 5] = ["region", "variety", "process", "taste_note_1", "taste_note_2"];
/// Questions asked once per case.
pub const BONUS_KEYS: [&str; 2] = [FAVORITE_COFFEE, BREWING_METHOD];

pub(crate) const ELEMENTS: &[&str] = &[
    CASE_NAME,
    CASE_DESCRIPTION,
    ORDER_ID,
    FAVORITE_COFFEE,
    BREWING_METHOD,
    MAX_SCORE,
    COFFEE_QUESTION_COUNT,
    BONUS_QUESTION_COUNT,
    SUBMIT_BUTTON,
    SUCCESS,
    ERROR,
];

/// Id of one coffee's answer field, `coffee` counted from 1.
pub fn field_id(coffee: usize, key: &str) -> String {
    format!("coffee{}_{}", coffee, key)
}

/// Id of the wrapper shown or hidden with a question.
pub fn group_id(field: &str) -> String {
    format!("{}_group", field)
}

/// Every form field id with its visibility group.
pub(crate) fn field_ids() -> Vec<String> {
    let mut ids = Vec::new();
    for coffee in 1..=COFFEES_PER_CASE {
        for key in COFFEE_KEYS {
            let field = field_id(coffee, key);
            ids.push(group_id(&field));
            ids.push(field);
        }
    }
    ids.extend(BONUS_KEYS.iter().map(|key| group_id(key)));
    ids
}

/// Selects filled from the catalog.
pub(crate) fn select_bindings() -> Vec<(Category, String)> {
    let mut bindings = Vec::new();
    for coffee in 1..=COFFEES_PER_CASE {
        bindings.push((Category::Region, field_id(coffee, "region")));
        bindings.push((Category::Variety, field_id(coffee, "variety")));
        bindings.push((Category::Process, field_id(coffee, "process")));
    }
    bindings.push((Category::BrewingMethod, BREWING_METHOD.to_string()));
    bindings
}

/// Router entry: load the active case and the catalog dropdowns.
pub async fn load(ctx: &AppContext) {
    ctx.set_active_case(None);
    ctx.doc.set_visible(SUCCESS, false);
    ctx.doc.set_visible(ERROR, false);
    ctx.doc.set_text(CASE_NAME, "Cargando caso...");

    let (case, catalog) = futures::join!(load_active_case(ctx), pages::load_catalog_selects(ctx));

    if let Err(e) = case {
        tracing::error!(error = %e, "Failed to load active case");
        ctx.doc.set_text(CASE_NAME, "No hay un caso activo en este momento");
        ctx.doc.set_text(CASE_DESCRIPTION, &e.user_message());
    }
    if let Err(e) = catalog {
        tracing::error!(error = %e, "Failed to load catalog dropdowns");
    }
}

async fn load_active_case(ctx: &AppContext) -> AppResult<ActiveCaseView> {
    let response = fetch_public_case(ctx).await?;
    let view = ActiveCaseView::from(response.case);

    ctx.doc.set_text(CASE_NAME, &view.name);
    ctx.doc.set_text(CASE_DESCRIPTION, &view.description);
    apply_question_visibility(ctx.doc.as_ref(), &view.questions);
    update_scoring_info(ctx.doc.as_ref(), &view.scoring());

    let mut favorites = vec![SelectOption::placeholder("Selecciona tu favorito")];
    favorites.extend((1..=view.coffee_ids.len()).map(|n| {
        SelectOption::new(format!("coffee{}", n), format!("Café #{}", n))
    }));
    ctx.doc.set_options(FAVORITE_COFFEE, &favorites);

    tracing::debug!(case_id = %view.id, coffees = view.coffee_ids.len(), "Active case loaded");
    ctx.set_active_case(Some(view.clone()));
    Ok(view)
}

/// The answer-free endpoint, or the plain one on backends that do not
/// route it. Either way answer fields are dropped while deserializing.
async fn fetch_public_case(ctx: &AppContext) -> AppResult<CaseResponse<PublicCase>> {
    match ctx.api.get(endpoints::ACTIVE_CASE_PUBLIC).await {
        Err(AppError::Http { status: 404, .. }) => {
            tracing::debug!("Public active case not routed, using the plain endpoint");
            ctx.api.get(endpoints::ACTIVE_CASE).await
        }
        other => other,
    }
}

/// Hide the field group of every disabled question.
pub fn apply_question_visibility(doc: &dyn Document, questions: &EnabledQuestions) {
    for (key, enabled) in questions.flags() {
        if BONUS_KEYS.contains(&key) {
            doc.set_visible(&group_id(key), enabled);
        } else {
            for coffee in 1..=COFFEES_PER_CASE {
                doc.set_visible(&group_id(&field_id(coffee, key)), enabled);
            }
        }
    }
}

/// Render the maximum score and question counts.
pub fn update_scoring_info(doc: &dyn Document, scoring: &ScoringInfo) {
    doc.set_text(MAX_SCORE, &scoring.max_score.to_string());
    doc.set_text(COFFEE_QUESTION_COUNT, &scoring.coffee_questions.to_string());
    doc.set_text(BONUS_QUESTION_COUNT, &scoring.bonus_questions.to_string());
}

/// Read the answer form.
pub fn read_form(doc: &dyn Document) -> SubmissionForm {
    let coffees = std::array::from_fn(|i| {
        let coffee = i + 1;
        CoffeeGuess {
            region: doc.text_value(&field_id(coffee, "region")),
            variety: doc.text_value(&field_id(coffee, "variety")),
            process: doc.text_value(&field_id(coffee, "process")),
            taste_note_1: doc.text_value(&field_id(coffee, "taste_note_1")),
            taste_note_2: doc.text_value(&field_id(coffee, "taste_note_2")),
        }
    });

    SubmissionForm {
        order_id: doc.text_value(ORDER_ID),
        coffees,
        favorite_coffee: doc.text_value(FAVORITE_COFFEE),
        brewing_method: doc.text_value(BREWING_METHOD),
    }
}

/// Build the submission from the form and the active case's coffee ids,
/// POST it, keep the result briefly and move on to the thank-you page.
pub async fn submit(ctx: &AppContext) -> AppResult<SubmissionResult> {
    ctx.doc.set_visible(SUCCESS, false);
    ctx.doc.set_visible(ERROR, false);

    match send(ctx).await {
        Ok(result) => {
            ctx.doc.set_visible(SUCCESS, true);
            router::navigate_to(ctx, Page::ThankYou.path()).await;
            Ok(result)
        }
        Err(e) => {
            tracing::error!(error = %e, "Submission failed");
            let message = e.user_message();
            ctx.doc.set_text(ERROR, &message);
            ctx.doc.set_visible(ERROR, true);
            ctx.doc.notify(&message, NoticeKind::Error);
            Err(e)
        }
    }
}

async fn send(ctx: &AppContext) -> AppResult<SubmissionResult> {
    if !ctx.session.is_authenticated() {
        return Err(AppError::AuthRequired);
    }

    let case = ctx.active_case().unwrap_or_default();
    let submission = Submission::assemble(&case, read_form(ctx.doc.as_ref()))?;

    ctx.doc.set_disabled(SUBMIT_BUTTON, true);
    let sent: AppResult<SubmissionReceipt> =
        ctx.api.post(endpoints::SUBMISSIONS, &submission).await;
    ctx.doc.set_disabled(SUBMIT_BUTTON, false);
    let receipt = sent?;

    let result = SubmissionResult {
        score: receipt.score,
        accuracy: receipt.accuracy,
    };
    tracing::info!(
        order_id = %submission.order_id,
        score = result.score,
        "Submission accepted"
    );

    match serde_json::to_string(&result) {
        Ok(raw) => {
            if let Err(e) = ctx
                .scratch
                .set(thankyou::RESULT_KEY, &raw, Some(ctx.config.result_ttl))
            {
                tracing::warn!(error = %e, "Failed to keep submission result");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to encode submission result"),
    }

    Ok(result)
}
