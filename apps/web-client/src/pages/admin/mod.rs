//! Admin page - catalog, case and order management panels.
//!
//! Every panel follows the same cycle: list, show a form for create or
//! edit, POST/PUT, or confirm and DELETE, then reload the list. Last write
//! wins; there is no concurrency control.

pub mod cases;
pub mod catalog;
pub mod orders;

use brew_core::domain::{Case, CatalogItem, Order, UserSummary};
use brew_core::ports::{NoticeKind, SelectOption};
use brew_shared::dto::UsersResponse;

use crate::api::endpoints;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::pages;

/// Records listed on the admin panels, kept to fill edit forms.
#[derive(Debug, Default)]
pub struct AdminState {
    pub catalog_items: Vec<CatalogItem>,
    pub cases: Vec<Case>,
    pub orders: Vec<Order>,
    pub editing_catalog: Option<String>,
    pub editing_case: Option<String>,
    pub editing_order: Option<String>,
}

/// Router entry: load every panel and the form dropdowns.
pub async fn load(ctx: &AppContext) {
    let (catalog_items, cases, orders, selects, users) = futures::join!(
        catalog::load_list(ctx),
        cases::load_list(ctx),
        orders::load_list(ctx),
        pages::load_catalog_selects(ctx),
        load_user_options(ctx),
    );

    for (panel, result) in [
        ("catalog", catalog_items),
        ("cases", cases),
        ("orders", orders),
        ("catalog dropdowns", selects.map(|_| ())),
        ("users", users),
    ] {
        if let Err(e) = result {
            tracing::error!(panel, error = %e, "Admin panel failed to load");
        }
    }
}

/// Fill the order form's user dropdown.
async fn load_user_options(ctx: &AppContext) -> AppResult<()> {
    let response: UsersResponse<UserSummary> = ctx.api.get(endpoints::ADMIN_USERS).await?;

    let mut options = vec![SelectOption::placeholder("Sin usuario (cliente externo)")];
    options.extend(response.users.iter().map(|user| {
        SelectOption::new(
            user.id.as_str(),
            format!("{} ({})", user.display_name(), user.email),
        )
    }));
    ctx.doc.set_options(orders::USER, &options);
    Ok(())
}

/// Notify the outcome of an admin action.
fn report<T>(ctx: &AppContext, result: AppResult<T>, success: &str) -> AppResult<T> {
    match &result {
        Ok(_) => ctx.doc.notify(success, NoticeKind::Success),
        Err(e) => {
            tracing::error!(error = %e, "Admin action failed");
            ctx.doc.notify(&e.user_message(), NoticeKind::Error);
        }
    }
    result
}

fn active_label(active: bool) -> &'static str {
    if active { "Activo" } else { "Inactivo" }
}

/// Parse a numeric form field, treating blank as zero.
fn parse_number<T: std::str::FromStr + Default>(raw: &str, field: &str) -> AppResult<T> {
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse().map_err(|_| {
        brew_core::DomainError::Validation(format!("{} must be a number", field)).into()
    })
}
