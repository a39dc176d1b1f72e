use serde::{Deserialize, Serialize};

/// Server-shaped user record as cached by the client.
///
/// Replaced wholesale after every profile fetch; the only field ever
/// patched in place is `name`, after a profile save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// `"admin"` or `"user"`. Absent in token-derived summaries.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub cases_count: u32,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl UserSummary {
    pub fn is_admin(&self) -> bool {
        self.user_type.as_deref() == Some("admin")
    }

    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Accumulated points, falling back to the legacy `score` field.
    pub fn total_points(&self) -> i64 {
        if self.points > 0 { self.points } else { self.score }
    }
}
