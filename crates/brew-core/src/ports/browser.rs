//! Browser port - location, session history and navigation.

/// The parts of the current URL the client reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
    /// Fragment without the leading `#`.
    pub hash: String,
}

impl Location {
    /// Parse a path-and-rest string such as `/profile?x=1#token=abc`.
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, hash.to_string()),
            None => (url, String::new()),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query.to_string()),
            None => (rest, String::new()),
        };
        let path = if path.is_empty() { "/" } else { path };

        Self {
            path: path.to_string(),
            query,
            hash,
        }
    }
}

pub trait Browser: Send + Sync {
    fn location(&self) -> Location;

    /// Add a history entry and move to it, like `history.pushState`.
    fn push_state(&self, path: &str);

    /// Rewrite the current history entry, like `history.replaceState`.
    fn replace_state(&self, path: &str);

    /// Step back in history. Returns `false` at the start of history.
    fn back(&self) -> bool;

    /// Step forward in history. Returns `false` at the end of history.
    fn forward(&self) -> bool;

    /// Leave the page for an absolute or site-relative URL.
    fn redirect(&self, url: &str);

    fn reload(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let loc = Location::parse("/auth/callback?code=abc&state=xyz#frag");
        assert_eq!(loc.path, "/auth/callback");
        assert_eq!(loc.query, "code=abc&state=xyz");
        assert_eq!(loc.hash, "frag");

        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("#token=t").hash, "token=t");
    }
}
