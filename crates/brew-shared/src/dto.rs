//! Request/response envelopes for the backend's JSON API.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// GET /auth/google
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// GET /auth/google/callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse<U> {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<U>,
}

/// GET /api/v1/leaderboard and /api/v1/leaderboard/current
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct LeaderboardResponse<E> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub leaderboard: Vec<E>,
    #[serde(default)]
    pub total_users: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
}

/// Single case envelope: `{"case": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResponse<C> {
    pub case: C,
}

/// Paged list envelopes. The backend names the list key per resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct CasesResponse<C> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cases: Vec<C>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub struct ItemsResponse<I> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<I>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "O: Deserialize<'de>"))]
pub struct OrdersResponse<O> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub orders: Vec<O>,
    #[serde(default)]
    pub count: usize,
}

/// GET /api/v1/admin/users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "U: Deserialize<'de>"))]
pub struct UsersResponse<U> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<U>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct SubmissionsResponse<S> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submissions: Vec<S>,
    #[serde(default)]
    pub count: usize,
}

/// GET /api/v1/catalog - active options grouped by category key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "O: Deserialize<'de>"))]
pub struct CatalogResponse<O> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub catalog: BTreeMap<String, Vec<O>>,
}

/// PUT /api/v1/users/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
}

/// PUT /api/v1/users/{id} response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse<U> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<U>,
}

/// POST /api/v1/submissions response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub submission_id: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub accuracy: f64,
}

/// The backend encodes an empty list as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
