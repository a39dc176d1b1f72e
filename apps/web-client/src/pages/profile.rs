//! Profile page - editable name, statistics and case history.

use brew_core::domain::{HistoryEntry, LeaderboardEntry, ProfileStats, UserSummary, percent};
use brew_core::ports::{NoticeKind, Row};
use brew_shared::dto::{
    LeaderboardResponse, ProfileUpdateRequest, ProfileUpdateResponse, SubmissionsResponse,
};

use crate::api::endpoints;
use crate::auth_ui;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub const NAME_INPUT: &str = "profileName";
pub const EMAIL_INPUT: &str = "profileEmail";
pub const STAT_POINTS: &str = "statPoints";
pub const STAT_RANK: &str = "statRank";
pub const STAT_CASES: &str = "statCases";
pub const STAT_ACCURACY: &str = "statAccuracy";
pub const HISTORY_LIST: &str = "caseHistory";
pub const HISTORY_STATUS: &str = "caseHistoryStatus";

pub(crate) const ELEMENTS: &[&str] = &[
    NAME_INPUT,
    EMAIL_INPUT,
    STAT_POINTS,
    STAT_RANK,
    STAT_CASES,
    STAT_ACCURACY,
    HISTORY_LIST,
    HISTORY_STATUS,
];

const STATS: [&str; 4] = [STAT_POINTS, STAT_RANK, STAT_CASES, STAT_ACCURACY];

/// Router entry: refetch the profile, then fill the form, stats and history.
pub async fn load(ctx: &AppContext) {
    let user = match ctx.api.get::<UserSummary>(endpoints::PROFILE).await {
        Ok(user) => {
            if let Err(e) = ctx.session.set_user(&user) {
                tracing::warn!(error = %e, "Failed to cache profile");
            }
            Some(user)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Profile refresh failed, using cached user");
            ctx.session.user()
        }
    };

    if let Some(user) = user {
        populate(ctx, &user).await;
    }
    load_history(ctx).await;
}

/// Fill the profile form and statistics for `user`.
pub async fn populate(ctx: &AppContext, user: &UserSummary) {
    ctx.doc.set_value(NAME_INPUT, &user.name);
    ctx.doc.set_value(EMAIL_INPUT, &user.email);
    // Email comes from the OAuth provider
    ctx.doc.set_disabled(EMAIL_INPUT, true);

    update_stats(ctx, user).await;
}

async fn update_stats(ctx: &AppContext, user: &UserSummary) {
    for id in STATS {
        ctx.doc.set_text(id, "...");
    }

    let global: AppResult<LeaderboardResponse<LeaderboardEntry>> =
        ctx.api.get(endpoints::LEADERBOARD).await;

    match global {
        Ok(ranking) => {
            let stats = ProfileStats::compute(user, &ranking.leaderboard);
            ctx.doc.set_text(STAT_POINTS, &stats.points_text());
            ctx.doc.set_text(STAT_RANK, &stats.rank_text());
            ctx.doc.set_text(STAT_CASES, &stats.cases.to_string());
            ctx.doc.set_text(STAT_ACCURACY, &stats.accuracy_text());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user stats");
            for id in STATS {
                ctx.doc.set_text(id, "Error");
            }
        }
    }
}

/// Fetch and render the user's past submissions.
pub async fn load_history(ctx: &AppContext) {
    ctx.doc.set_text(HISTORY_STATUS, "Cargando historial...");

    let history: AppResult<SubmissionsResponse<HistoryEntry>> =
        ctx.api.get(endpoints::SUBMISSIONS).await;

    match history {
        Ok(response) if response.submissions.is_empty() => {
            ctx.doc.render_rows(HISTORY_LIST, Vec::new());
            ctx.doc
                .set_text(HISTORY_STATUS, "Aún no has resuelto ningún caso. ¡Ordena tu primer caso!");
        }
        Ok(response) => {
            ctx.doc.render_rows(HISTORY_LIST, history_rows(&response.submissions));
            ctx.doc.set_text(HISTORY_STATUS, "");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load case history");
            ctx.doc.set_text(HISTORY_STATUS, "Error al cargar el historial de casos");
        }
    }
}

pub fn history_rows(entries: &[HistoryEntry]) -> Vec<Row> {
    entries
        .iter()
        .map(|entry| {
            let name = if entry.case_name.is_empty() {
                "Caso"
            } else {
                entry.case_name.as_str()
            };
            let date = entry
                .submitted_at
                .map(|at| at.format("%d/%m/%Y").to_string())
                .unwrap_or_default();
            Row::new(
                entry.id.clone(),
                vec![
                    name.to_string(),
                    format!("{} pts", entry.score),
                    format!("{}%", percent(entry.accuracy)),
                    date,
                ],
            )
        })
        .collect()
}

/// Save the edited name. Only the cached user's `name` is patched.
pub async fn save(ctx: &AppContext) -> AppResult<()> {
    let result = try_save(ctx).await;
    match &result {
        Ok(()) => {
            ctx.doc
                .notify("¡Perfil actualizado exitosamente!", NoticeKind::Success);
            auth_ui::sync(ctx).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Profile save failed");
            ctx.doc.notify(&e.user_message(), NoticeKind::Error);
        }
    }
    result
}

async fn try_save(ctx: &AppContext) -> AppResult<()> {
    if !ctx.session.is_authenticated() {
        return Err(AppError::AuthRequired);
    }
    let user = ctx.session.user().ok_or(AppError::AuthRequired)?;

    let name = ctx.doc.text_value(NAME_INPUT);
    if name.is_empty() {
        return Err(brew_core::DomainError::Validation("name is required".to_string()).into());
    }

    let endpoint = format!("{}/{}", endpoints::USERS, user.id);
    let _: ProfileUpdateResponse<UserSummary> = ctx
        .api
        .put(&endpoint, &ProfileUpdateRequest { name: name.clone() })
        .await?;

    ctx.session.update_user_name(&name)?;
    tracing::info!(user_id = %user.id, "Profile updated");
    Ok(())
}
