//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://brew-detective-backend-1087966598090.us-central1.run.app";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend origin, without a trailing slash.
    pub api_base_url: String,
    /// File holding the persistent session (`localStorage`).
    pub storage_path: PathBuf,
    /// WhatsApp number orders are sent to. `None` lets the user pick a chat.
    pub order_whatsapp_number: Option<String>,
    /// Pause between the "login required" notice and the redirect home.
    pub auth_notice_delay: Duration,
    /// Period of the cosmetic leaderboard highlight.
    pub highlight_interval: Duration,
    /// Lifetime of the stored submission result shown on the thank-you page.
    pub result_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_path: PathBuf::from(".brew-detective/storage.json"),
            order_whatsapp_number: None,
            auth_notice_delay: Duration::from_millis(2000),
            highlight_interval: Duration::from_secs(10),
            result_ttl: Duration::from_secs(600),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            storage_path: env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            order_whatsapp_number: env::var("ORDER_WHATSAPP_NUMBER")
                .ok()
                .map(|n| n.chars().filter(char::is_ascii_digit).collect::<String>())
                .filter(|n| !n.is_empty()),
            auth_notice_delay: env::var("AUTH_NOTICE_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.auth_notice_delay),
            highlight_interval: env::var("HIGHLIGHT_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.highlight_interval),
            result_ttl: env::var("RESULT_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.result_ttl),
        }
    }

    /// Same defaults, pointed at another backend.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.api_base_url.starts_with("https://"));
        assert_eq!(config.auth_notice_delay, Duration::from_secs(2));
        assert_eq!(config.highlight_interval, Duration::from_secs(10));
        assert!(config.order_whatsapp_number.is_none());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = AppConfig::with_base_url("http://localhost:8888/");
        assert_eq!(config.api_base_url, "http://localhost:8888");
    }
}
