//! Client-side router - one page section visible at a time.

use brew_core::DomainError;
use brew_core::domain::{Access, Page};
use brew_core::ports::NoticeKind;

use crate::context::AppContext;
use crate::error::AppError;
use crate::pages;

/// Show the page matching the current URL.
pub async fn resolve(ctx: &AppContext) -> Page {
    let location = ctx.browser.location();
    show(ctx, Page::from_path(&location.path)).await
}

/// Push a history entry for `path`, then show it.
pub async fn navigate_to(ctx: &AppContext, path: &str) -> Page {
    ctx.browser.push_state(path);
    resolve(ctx).await
}

/// Back/forward navigation: the URL already changed, nothing is pushed.
pub async fn on_popstate(ctx: &AppContext) -> Page {
    resolve(ctx).await
}

/// Show `page` and run its loaders. Returns the page actually shown,
/// which is `Home` when an access check turned the visitor away.
pub async fn show(ctx: &AppContext, page: Page) -> Page {
    let page = match check_access(ctx, page) {
        Ok(page) => page,
        Err(err) => {
            tracing::info!(%page, error = %err, "Access denied, returning home");
            ctx.doc.notify(&err.user_message(), NoticeKind::Error);
            tokio::time::sleep(ctx.config.auth_notice_delay).await;
            ctx.browser.push_state(Page::Home.path());
            Page::Home
        }
    };

    display(ctx, page);

    match page {
        Page::Leaderboard => pages::leaderboard::load(ctx).await,
        Page::Profile => pages::profile::load(ctx).await,
        Page::Submit => pages::submit::load(ctx).await,
        Page::Admin => pages::admin::load(ctx).await,
        Page::Order => pages::order::render(ctx),
        Page::ThankYou => pages::thankyou::render(ctx),
        Page::Home => {}
    }

    page
}

fn check_access(ctx: &AppContext, page: Page) -> Result<Page, AppError> {
    match page.access() {
        Access::Public => Ok(page),
        Access::Authenticated if ctx.session.is_authenticated() => Ok(page),
        Access::Admin if ctx.session.is_authenticated() => {
            let is_admin = ctx.session.user().map(|u| u.is_admin()).unwrap_or(false);
            if is_admin {
                Ok(page)
            } else {
                Err(AppError::Domain(DomainError::Unauthorized))
            }
        }
        _ => Err(AppError::AuthRequired),
    }
}

fn display(ctx: &AppContext, page: Page) {
    if page != Page::Leaderboard {
        ctx.stop_highlighter();
    }
    if page != Page::Admin {
        ctx.clear_admin();
    }
    ctx.doc.activate_section(page.section_id());
    ctx.doc.set_title(page.title());
    tracing::debug!(%page, "Page shown");
}
