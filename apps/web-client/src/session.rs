//! Session store - bearer token and cached user in persistent storage.

use std::sync::Arc;

use chrono::Utc;

use brew_core::domain::UserSummary;
use brew_core::ports::{Storage, StorageError, TokenClaims, TokenDecoder};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user_data";

/// Token and cached user, persisted across restarts.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
    decoder: Arc<dyn TokenDecoder>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>, decoder: Arc<dyn TokenDecoder>) -> Self {
        Self { storage, decoder }
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token, None)
    }

    /// Clear the token and the cached user together.
    pub fn remove_token(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    pub fn user(&self) -> Option<UserSummary> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Cached user data is unreadable");
                None
            }
        }
    }

    pub fn set_user(&self, user: &UserSummary) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(USER_KEY, &raw, None)
    }

    /// Patch the cached user's name after a profile save.
    pub fn update_user_name(&self, name: &str) -> Result<(), StorageError> {
        match self.user() {
            Some(mut user) => {
                user.name = name.to_string();
                self.set_user(&user)
            }
            None => Ok(()),
        }
    }

    /// Claims of the stored token, if it decodes.
    pub fn claims(&self) -> Option<TokenClaims> {
        let token = self.token()?;
        self.decoder.decode(&token).ok()
    }

    /// True iff a token is stored and its `exp` claim lies in the future.
    ///
    /// Any decode failure counts as signed out.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        match self.decoder.decode(&token) {
            Ok(claims) => claims
                .exp
                .map(|exp| exp.saturating_mul(1000) > Utc::now().timestamp_millis())
                .unwrap_or(false),
            Err(e) => {
                tracing::debug!(error = %e, "Stored token does not decode");
                false
            }
        }
    }
}
