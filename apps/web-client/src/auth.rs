//! Sign-in and sign-out flows.

use std::collections::HashMap;

use brew_core::domain::{Page, UserSummary};
use brew_core::ports::{AuthError, NoticeKind};
use brew_shared::dto::{AuthUrlResponse, CallbackResponse};

use crate::api::endpoints;
use crate::auth_ui;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::router;

const SIGNED_IN: &str = "¡Sesión iniciada exitosamente!";
const LOGIN_FAILED: &str = "Error al iniciar sesión. Por favor intenta nuevamente.";
const CALLBACK_FAILED: &str = "Error al procesar la autenticación. Por favor intenta nuevamente.";

/// Page-load entry: finish an OAuth round trip if the URL carries one,
/// then sync the navigation and show the current page.
pub async fn boot(ctx: &AppContext) -> Page {
    let location = ctx.browser.location();

    if location.path == "/auth/callback" || location.query.contains("code=") {
        handle_oauth_callback(ctx).await;
    } else if location.hash.contains("token=") {
        return handle_token_from_url(ctx).await;
    }

    auth_ui::sync(ctx).await;
    router::resolve(ctx).await
}

/// Ask the backend for the provider's authorization URL and go there.
pub async fn login(ctx: &AppContext) -> AppResult<()> {
    match ctx.api.get::<AuthUrlResponse>(endpoints::AUTH_GOOGLE).await {
        Ok(response) => {
            tracing::info!("Redirecting to OAuth provider");
            ctx.browser.redirect(&response.auth_url);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            ctx.doc.notify(LOGIN_FAILED, NoticeKind::Error);
            Err(e)
        }
    }
}

/// Tell the backend (best effort), then always clear the session and reload.
pub async fn logout(ctx: &AppContext) {
    if ctx.session.is_authenticated() {
        let result: AppResult<serde_json::Value> = ctx
            .api
            .post(endpoints::AUTH_LOGOUT, &serde_json::json!({}))
            .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "Logout request failed");
        }
    }

    if let Err(e) = ctx.session.remove_token() {
        tracing::error!(error = %e, "Failed to clear session");
    }
    ctx.browser.reload();
}

fn query_params(raw: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

/// Complete the authorization-code flow from `/auth/callback?code&state`.
pub async fn handle_oauth_callback(ctx: &AppContext) {
    let params = query_params(&ctx.browser.location().query);

    if let Some(error) = params.get("error") {
        tracing::error!(error = %error, "OAuth provider returned an error");
        ctx.doc.notify(LOGIN_FAILED, NoticeKind::Error);
        ctx.browser.redirect(Page::Home.path());
        return;
    }

    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        tracing::warn!("Callback without code or state");
        return;
    };

    match exchange_code(ctx, code, state).await {
        Ok(()) => {
            auth_ui::sync(ctx).await;
            ctx.doc.notify(SIGNED_IN, NoticeKind::Success);
        }
        Err(e) => {
            tracing::error!(error = %e, "Callback error");
            ctx.doc.notify(CALLBACK_FAILED, NoticeKind::Error);
        }
    }
    ctx.browser.redirect(Page::Home.path());
}

async fn exchange_code(ctx: &AppContext, code: &str, state: &str) -> AppResult<()> {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("code", code)
        .append_pair("state", state)
        .finish();
    let endpoint = format!("{}?{}", endpoints::AUTH_CALLBACK, query);

    let response: CallbackResponse<UserSummary> = ctx.api.get(&endpoint).await?;
    match (response.token, response.user) {
        (Some(token), Some(user)) if !token.is_empty() => {
            ctx.session.set_token(&token)?;
            ctx.session.set_user(&user)?;
            tracing::info!(user_id = %user.id, "Signed in");
            Ok(())
        }
        _ => Err(AppError::Auth(AuthError::OAuth(
            "Invalid response from server".to_string(),
        ))),
    }
}

/// Accept a token handed over in the fragment (`#token=...`), clean the
/// URL and show the profile.
pub async fn handle_token_from_url(ctx: &AppContext) -> Page {
    let location = ctx.browser.location();
    let params = query_params(&location.hash);

    let Some(token) = params.get("token").filter(|t| !t.is_empty()) else {
        return router::resolve(ctx).await;
    };

    if let Err(e) = ctx.session.set_token(token) {
        tracing::error!(error = %e, "Failed to store token");
    }

    // Provisional summary until the profile fetch fills in the rest
    match ctx.session.claims() {
        Some(claims) => {
            let user = UserSummary {
                id: claims.user_id.unwrap_or_default(),
                email: claims.email.unwrap_or_default(),
                name: claims.name.unwrap_or_default(),
                ..Default::default()
            };
            if let Err(e) = ctx.session.set_user(&user) {
                tracing::error!(error = %e, "Failed to cache user");
            }
        }
        None => tracing::error!("Failed to parse token"),
    }

    auth_ui::sync(ctx).await;
    ctx.doc.notify(SIGNED_IN, NoticeKind::Success);

    ctx.browser.replace_state(Page::Profile.path());
    router::resolve(ctx).await
}
