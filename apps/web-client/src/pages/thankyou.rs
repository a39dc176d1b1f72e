//! Thank-you page - score of the submission just sent.

use brew_core::domain::SubmissionResult;

use crate::context::AppContext;

pub const RESULT_KEY: &str = "submission_result";

pub const SCORE: &str = "thankyouScore";
pub const ACCURACY: &str = "thankyouAccuracy";

pub(crate) const ELEMENTS: &[&str] = &[SCORE, ACCURACY];

pub fn render(ctx: &AppContext) {
    let result = ctx
        .scratch
        .get(RESULT_KEY)
        .and_then(|raw| serde_json::from_str::<SubmissionResult>(&raw).ok());

    match result {
        Some(result) => {
            ctx.doc.set_text(SCORE, &result.score.to_string());
            ctx.doc.set_text(ACCURACY, &format!("{}%", result.accuracy_percent()));
        }
        None => {
            tracing::debug!("No stored submission result");
            ctx.doc.set_text(SCORE, "--");
            ctx.doc.set_text(ACCURACY, "--");
        }
    }
}
