use std::fmt;

/// Who may enter a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// The finite set of page sections the router shows, one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Order,
    Submit,
    Leaderboard,
    Profile,
    Admin,
    ThankYou,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Order,
        Page::Submit,
        Page::Leaderboard,
        Page::Profile,
        Page::Admin,
        Page::ThankYou,
    ];

    /// Resolve a URL path to a page. Unknown paths fall back to `Home`.
    pub fn from_path(path: &str) -> Page {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');

        Self::ALL
            .into_iter()
            .find(|page| page.path().trim_matches('/') == trimmed)
            .unwrap_or(Page::Home)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Order => "/order",
            Page::Submit => "/submit",
            Page::Leaderboard => "/leaderboard",
            Page::Profile => "/profile",
            Page::Admin => "/admin",
            Page::ThankYou => "/thankyou",
        }
    }

    /// DOM id of the section element for this page.
    pub fn section_id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Order => "order",
            Page::Submit => "submit",
            Page::Leaderboard => "leaderboard",
            Page::Profile => "profile",
            Page::Admin => "admin",
            Page::ThankYou => "thankyou",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Brew Detective - Resuelve el misterio del café",
            Page::Order => "Ordenar Caso - Brew Detective",
            Page::Submit => "Enviar Respuestas - Brew Detective",
            Page::Leaderboard => "Ranking - Brew Detective",
            Page::Profile => "Mi Perfil - Brew Detective",
            Page::Admin => "Administración - Brew Detective",
            Page::ThankYou => "¡Gracias! - Brew Detective",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Page::Submit | Page::Profile => Access::Authenticated,
            Page::Admin => Access::Admin,
            _ => Access::Public,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_id())
    }
}
