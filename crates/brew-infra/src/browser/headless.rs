//! Headless session history.

use std::sync::Mutex;

use brew_core::ports::{Browser, Location};

struct History {
    entries: Vec<String>,
    index: usize,
    redirects: Vec<String>,
    reloads: usize,
}

/// A browser tab without a window: a history stack, the current URL and a
/// log of full-page redirects and reloads.
pub struct HeadlessBrowser {
    history: Mutex<History>,
}

impl HeadlessBrowser {
    /// Open a tab at `url` (path plus optional query and fragment).
    pub fn new(url: &str) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![url.to_string()],
                index: 0,
                redirects: Vec::new(),
                reloads: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of history entries, including any forward entries.
    pub fn history_len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.lock().redirects.clone()
    }

    pub fn reload_count(&self) -> usize {
        self.lock().reloads
    }

    /// Full current URL, as last pushed or replaced.
    pub fn current_url(&self) -> String {
        let history = self.lock();
        history.entries[history.index].clone()
    }
}

impl Default for HeadlessBrowser {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Browser for HeadlessBrowser {
    fn location(&self) -> Location {
        Location::parse(&self.current_url())
    }

    fn push_state(&self, path: &str) {
        let mut history = self.lock();
        let next = history.index + 1;
        history.entries.truncate(next);
        history.entries.push(path.to_string());
        history.index = next;
    }

    fn replace_state(&self, path: &str) {
        let mut history = self.lock();
        let index = history.index;
        history.entries[index] = path.to_string();
    }

    fn back(&self) -> bool {
        let mut history = self.lock();
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        true
    }

    fn forward(&self) -> bool {
        let mut history = self.lock();
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        true
    }

    fn redirect(&self, url: &str) {
        tracing::debug!(url, "Redirecting");
        let mut history = self.lock();
        history.redirects.push(url.to_string());
        // Site-relative targets load in this tab
        if url.starts_with('/') {
            let next = history.index + 1;
            history.entries.truncate(next);
            history.entries.push(url.to_string());
            history.index = next;
        }
    }

    fn reload(&self) {
        self.lock().reloads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let browser = HeadlessBrowser::new("/");
        browser.push_state("/leaderboard");
        browser.push_state("/profile");

        assert_eq!(browser.location().path, "/profile");
        assert!(browser.back());
        assert_eq!(browser.location().path, "/leaderboard");
        assert!(browser.forward());
        assert_eq!(browser.location().path, "/profile");
        assert!(!browser.forward());
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let browser = HeadlessBrowser::new("/");
        browser.push_state("/order");
        browser.back();
        browser.push_state("/submit");

        assert_eq!(browser.history_len(), 2);
        assert!(!browser.forward());
    }

    #[test]
    fn test_replace_state_keeps_length() {
        let browser = HeadlessBrowser::new("/#token=abc");
        browser.replace_state("/");

        assert_eq!(browser.history_len(), 1);
        assert!(browser.location().hash.is_empty());
    }

    #[test]
    fn test_external_redirect_is_logged_only() {
        let browser = HeadlessBrowser::new("/");
        browser.redirect("https://accounts.google.com/o/oauth2/auth");

        assert_eq!(browser.redirects().len(), 1);
        assert_eq!(browser.location().path, "/");
    }
}
