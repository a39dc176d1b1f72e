//! JSON-over-HTTP helper for the Brew Detective backend.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use brew_core::ports::{HttpRequest, Method, Transport};
use brew_shared::ErrorBody;

use crate::error::{AppError, AppResult};
use crate::session::Session;

/// Backend paths, relative to the configured base URL.
pub mod endpoints {
    pub const CASES: &str = "/api/v1/cases";
    pub const ACTIVE_CASE: &str = "/api/v1/cases/active";
    /// Active case without answers.
    pub const ACTIVE_CASE_PUBLIC: &str = "/api/v1/cases/active/public";
    pub const SUBMISSIONS: &str = "/api/v1/submissions";
    pub const LEADERBOARD: &str = "/api/v1/leaderboard";
    pub const LEADERBOARD_CURRENT: &str = "/api/v1/leaderboard/current";
    pub const USERS: &str = "/api/v1/users";
    pub const ORDERS: &str = "/api/v1/orders";
    pub const PROFILE: &str = "/api/v1/profile";
    pub const CATALOG: &str = "/api/v1/catalog";

    pub const ADMIN_CATALOG: &str = "/api/v1/admin/catalog";
    pub const ADMIN_CASES: &str = "/api/v1/admin/cases";
    pub const ADMIN_ORDERS: &str = "/api/v1/admin/orders";
    pub const ADMIN_USERS: &str = "/api/v1/admin/users";

    pub const AUTH_GOOGLE: &str = "/auth/google";
    pub const AUTH_CALLBACK: &str = "/auth/google/callback";
    pub const AUTH_LOGOUT: &str = "/auth/logout";
}

/// Sends JSON requests with the session's bearer token attached.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request and decode the JSON response.
    ///
    /// A 401 clears the session before failing with `AuthRequired`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
    ) -> AppResult<T> {
        let request_id = Uuid::new_v4();
        let mut request = HttpRequest::new(method, self.url(endpoint))
            .with_header("Content-Type", "application/json")
            .with_header("X-Request-ID", request_id.to_string());

        if let Some(token) = self.session.token() {
            request = request.with_header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.with_body(body);
        }

        tracing::debug!(%method, endpoint, %request_id, "API request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!(%method, endpoint, %request_id, error = %e, "API request failed");
            AppError::from(e)
        })?;

        if response.status == 401 {
            tracing::warn!(endpoint, %request_id, "Token rejected, clearing session");
            if let Err(e) = self.session.remove_token() {
                tracing::error!(error = %e, "Failed to clear session");
            }
            return Err(AppError::AuthRequired);
        }

        if !response.is_success() {
            let error = ErrorBody::parse(&response.body);
            tracing::error!(
                %method,
                endpoint,
                %request_id,
                status = response.status,
                error = ?error.as_ref().map(|e| e.error.as_str()),
                "API request failed"
            );
            return Err(AppError::Http {
                status: response.status,
                message: error.map(|e| e.error),
            });
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(endpoint, %request_id, error = %e, "Unexpected response body");
            AppError::Decode(e.to_string())
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        self.request(Method::Get, endpoint, None).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, data: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(data)?;
        self.request(Method::Post, endpoint, Some(body)).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, data: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(data)?;
        self.request(Method::Put, endpoint, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        self.request(Method::Delete, endpoint, None).await
    }
}
