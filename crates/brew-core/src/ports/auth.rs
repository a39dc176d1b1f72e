//! Token inspection port.

/// Claims the client reads from its bearer token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Expiry in seconds since the epoch.
    pub exp: Option<i64>,
}

/// Reads claims out of a token without verifying its signature.
///
/// The client never holds the signing secret; the backend remains the
/// authority and answers 401 for a forged or stale token.
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("OAuth error: {0}")]
    OAuth(String),
}
