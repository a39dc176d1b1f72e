//! Navigation state synchronizer - login button vs. user menu.

use brew_core::domain::UserSummary;

use crate::api::endpoints;
use crate::context::AppContext;
use crate::pages::{order, profile};

pub const LOGIN_BUTTON: &str = "loginBtn";
pub const USER_DROPDOWN: &str = "userDropdown";
pub const USER_NAME: &str = "userName";
pub const ADMIN_MENU_ITEM: &str = "adminMenuItem";
pub const SUBMIT_MENU_ITEM: &str = "submitMenuItem";
pub const LOGIN_BUTTON_MOBILE: &str = "loginBtnMobile";
pub const USER_DROPDOWN_MOBILE: &str = "userDropdownMobile";
pub const ADMIN_MENU_ITEM_MOBILE: &str = "adminMenuItemMobile";
pub const SUBMIT_MENU_ITEM_MOBILE: &str = "submitMenuItemMobile";

pub(crate) const ELEMENTS: &[&str] = &[
    LOGIN_BUTTON,
    USER_DROPDOWN,
    USER_NAME,
    ADMIN_MENU_ITEM,
    SUBMIT_MENU_ITEM,
    LOGIN_BUTTON_MOBILE,
    USER_DROPDOWN_MOBILE,
    ADMIN_MENU_ITEM_MOBILE,
    SUBMIT_MENU_ITEM_MOBILE,
];

/// Bring the navigation in line with the session. Safe to call any number
/// of times.
///
/// When signed in, the profile is refetched first: token-derived summaries
/// lack the user type, which decides whether the admin entry shows.
pub async fn sync(ctx: &AppContext) {
    let mut user = ctx.session.user();

    if ctx.session.is_authenticated() {
        match ctx.api.get::<UserSummary>(endpoints::PROFILE).await {
            Ok(fresh) => {
                if let Err(e) = ctx.session.set_user(&fresh) {
                    tracing::warn!(error = %e, "Failed to cache profile");
                }
                user = Some(fresh);
            }
            Err(e) => tracing::warn!(error = %e, "Profile refresh failed, keeping cached user"),
        }
    }

    // A 401 above clears the session
    let user = user.filter(|_| ctx.session.is_authenticated());
    tracing::debug!(
        authenticated = user.is_some(),
        admin = user.as_ref().map(|u| u.is_admin()).unwrap_or(false),
        "Updating auth UI"
    );

    match user {
        Some(user) => {
            show_signed_in(ctx, &user);
            profile::populate(ctx, &user).await;
            profile::load_history(ctx).await;
            order::render(ctx);
        }
        None => {
            show_signed_out(ctx);
            order::render(ctx);
        }
    }
}

fn show_signed_in(ctx: &AppContext, user: &UserSummary) {
    let doc = &ctx.doc;
    for id in [LOGIN_BUTTON, LOGIN_BUTTON_MOBILE] {
        doc.set_visible(id, false);
    }
    for id in [USER_DROPDOWN, USER_DROPDOWN_MOBILE, SUBMIT_MENU_ITEM, SUBMIT_MENU_ITEM_MOBILE] {
        doc.set_visible(id, true);
    }
    for id in [ADMIN_MENU_ITEM, ADMIN_MENU_ITEM_MOBILE] {
        doc.set_visible(id, user.is_admin());
    }
    doc.set_text(USER_NAME, user.display_name());
}

fn show_signed_out(ctx: &AppContext) {
    let doc = &ctx.doc;
    for id in [LOGIN_BUTTON, LOGIN_BUTTON_MOBILE] {
        doc.set_visible(id, true);
    }
    for id in [
        USER_DROPDOWN,
        USER_DROPDOWN_MOBILE,
        SUBMIT_MENU_ITEM,
        SUBMIT_MENU_ITEM_MOBILE,
        ADMIN_MENU_ITEM,
        ADMIN_MENU_ITEM_MOBILE,
    ] {
        doc.set_visible(id, false);
    }
    doc.set_text(USER_NAME, "");
}
