//! Leaderboard page - current-case and global rankings side by side.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use brew_core::domain::{LeaderboardEntry, percent};
use brew_core::ports::Row;
use brew_shared::dto::LeaderboardResponse;

use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::AppResult;

pub const CURRENT_TITLE: &str = "currentCaseTitle";
pub const CURRENT_LIST: &str = "currentLeaderboard";
pub const CURRENT_STATUS: &str = "currentLeaderboardStatus";
pub const GLOBAL_LIST: &str = "globalLeaderboard";
pub const GLOBAL_STATUS: &str = "globalLeaderboardStatus";

pub(crate) const ELEMENTS: &[&str] = &[
    CURRENT_TITLE,
    CURRENT_LIST,
    CURRENT_STATUS,
    GLOBAL_LIST,
    GLOBAL_STATUS,
];

const HIGHLIGHT_DURATION: Duration = Duration::from_secs(1);

type Ranking = LeaderboardResponse<LeaderboardEntry>;

/// Load both rankings concurrently, then start the row highlighter.
pub async fn load(ctx: &AppContext) {
    ctx.doc.set_text(CURRENT_STATUS, "Cargando ranking...");
    ctx.doc.set_text(GLOBAL_STATUS, "Cargando ranking...");

    let (current, global): (AppResult<Ranking>, AppResult<Ranking>) = futures::join!(
        ctx.api.get(endpoints::LEADERBOARD_CURRENT),
        ctx.api.get(endpoints::LEADERBOARD),
    );

    match current {
        Ok(ranking) => {
            let title = ranking
                .case_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or("Caso actual");
            ctx.doc.set_text(CURRENT_TITLE, title);
            render(ctx, CURRENT_LIST, CURRENT_STATUS, &ranking.leaderboard);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load current case ranking");
            ctx.doc.render_rows(CURRENT_LIST, Vec::new());
            ctx.doc
                .set_text(CURRENT_STATUS, "No se pudo cargar el ranking del caso actual");
        }
    }

    match global {
        Ok(ranking) => render(ctx, GLOBAL_LIST, GLOBAL_STATUS, &ranking.leaderboard),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load global ranking");
            ctx.doc.render_rows(GLOBAL_LIST, Vec::new());
            ctx.doc.set_text(GLOBAL_STATUS, "No se pudo cargar el ranking global");
        }
    }

    start_highlighter(ctx);
}

fn render(ctx: &AppContext, list: &str, status: &str, entries: &[LeaderboardEntry]) {
    ctx.doc.render_rows(list, rows(entries));
    if entries.is_empty() {
        ctx.doc.set_text(status, "Aún no hay detectives en el ranking");
    } else {
        ctx.doc.set_text(status, "");
    }
}

/// One row per entry: rank, name, points, accuracy, cases.
pub fn rows(entries: &[LeaderboardEntry]) -> Vec<Row> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let name = if entry.detective_name.is_empty() {
                "Detective anónimo"
            } else {
                entry.detective_name.as_str()
            };
            Row::new(
                entry.user_id.clone(),
                vec![
                    format!("#{}", entry.display_rank(position)),
                    name.to_string(),
                    format!("{} pts", entry.points),
                    format!("{}%", percent(entry.accuracy)),
                    format!("{} casos", entry.cases_count),
                ],
            )
        })
        .collect()
}

/// Cycle a short highlight over the global ranking rows. Cosmetic only.
fn start_highlighter(ctx: &AppContext) {
    let doc = ctx.doc.clone();
    let period = ctx.config.highlight_interval;

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut next = 0usize;

        loop {
            ticker.tick().await;
            let count = doc.row_count(GLOBAL_LIST);
            if count == 0 {
                continue;
            }
            doc.highlight_row(GLOBAL_LIST, Some(next % count));
            next = next.wrapping_add(1);

            tokio::time::sleep(HIGHLIGHT_DURATION.min(period)).await;
            doc.highlight_row(GLOBAL_LIST, None);
        }
    });

    ctx.set_highlighter(handle);
}
