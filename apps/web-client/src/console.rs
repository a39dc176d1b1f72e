//! Line-oriented driver for the headless client.

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use brew_infra::{HeadlessBrowser, InMemoryDocument};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::pages::{admin, profile, submit};
use crate::{auth, router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Catalog,
    Cases,
    Orders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    List,
    New,
    Edit(String),
    Save,
    Delete(String),
    Cancel,
}

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Back,
    Forward,
    Login,
    /// Return from the OAuth provider with this query string.
    Callback(String),
    /// Return from the backend with `#token=<jwt>`.
    Token(String),
    Logout,
    Set { id: String, value: String },
    Submit,
    SaveProfile,
    Admin(Panel, AdminAction),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
open <path> | back | forward
login | callback <query> | token <jwt> | logout
set <id> <value> | submit | save-profile
admin <catalog|cases|orders> <list|new|edit ID|save|delete ID|cancel>
show | help | quit";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let arg = |name: &str| {
            if rest.is_empty() {
                Err(format!("{} needs an argument", name))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "open" => arg("open").map(Command::Open),
            "back" => Ok(Command::Back),
            "forward" => Ok(Command::Forward),
            "login" => Ok(Command::Login),
            "callback" => arg("callback").map(|q| Command::Callback(q.trim_start_matches('?').to_string())),
            "token" => arg("token").map(Command::Token),
            "logout" => Ok(Command::Logout),
            "set" => {
                let (id, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err("set needs an element id".to_string());
                }
                Ok(Command::Set {
                    id: id.to_string(),
                    value: value.to_string(),
                })
            }
            "submit" => Ok(Command::Submit),
            "save-profile" => Ok(Command::SaveProfile),
            "admin" => parse_admin(rest),
            "show" | "" => Ok(Command::Show),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

fn parse_admin(rest: &str) -> Result<Command, String> {
    let mut words = rest.split_whitespace();
    let panel = match words.next() {
        Some("catalog") => Panel::Catalog,
        Some("cases") => Panel::Cases,
        Some("orders") => Panel::Orders,
        other => return Err(format!("unknown admin panel: {}", other.unwrap_or(""))),
    };
    let id = |words: &mut std::str::SplitWhitespace<'_>| {
        words
            .next()
            .map(str::to_string)
            .ok_or_else(|| "missing record id".to_string())
    };
    let action = match words.next() {
        Some("list") | None => AdminAction::List,
        Some("new") => AdminAction::New,
        Some("edit") => AdminAction::Edit(id(&mut words)?),
        Some("save") => AdminAction::Save,
        Some("delete") => AdminAction::Delete(id(&mut words)?),
        Some("cancel") => AdminAction::Cancel,
        Some(other) => return Err(format!("unknown admin action: {}", other)),
    };
    Ok(Command::Admin(panel, action))
}

/// The client plus typed handles on its headless adapters.
pub struct Console {
    pub ctx: AppContext,
    pub doc: Arc<InMemoryDocument>,
    pub browser: Arc<HeadlessBrowser>,
    reloads_seen: usize,
}

impl Console {
    pub fn new(ctx: AppContext, doc: Arc<InMemoryDocument>, browser: Arc<HeadlessBrowser>) -> Self {
        Self {
            ctx,
            doc,
            browser,
            reloads_seen: 0,
        }
    }

    /// Run a command. Returns `false` once the console should exit.
    pub async fn execute(&mut self, command: Command) -> bool {
        let ctx = &self.ctx;
        let result: AppResult<()> = match command {
            Command::Open(path) => {
                router::navigate_to(ctx, &path).await;
                Ok(())
            }
            Command::Back => {
                if ctx.browser.back() {
                    router::on_popstate(ctx).await;
                }
                Ok(())
            }
            Command::Forward => {
                if ctx.browser.forward() {
                    router::on_popstate(ctx).await;
                }
                Ok(())
            }
            Command::Login => auth::login(ctx).await,
            Command::Callback(query) => {
                ctx.browser.push_state(&format!("/auth/callback?{}", query));
                auth::boot(ctx).await;
                Ok(())
            }
            Command::Token(token) => {
                ctx.browser.push_state(&format!("/#token={}", token));
                auth::boot(ctx).await;
                Ok(())
            }
            Command::Logout => {
                auth::logout(ctx).await;
                Ok(())
            }
            Command::Set { id, value } => {
                ctx.doc.set_value(&id, &value);
                Ok(())
            }
            Command::Submit => submit::submit(ctx).await.map(|_| ()),
            Command::SaveProfile => profile::save(ctx).await,
            Command::Admin(panel, action) => run_admin(ctx, panel, action).await,
            Command::Show | Command::Help => Ok(()),
            Command::Quit => return false,
        };

        if let Err(e) = result {
            tracing::debug!(error = %e, "Command failed");
        }

        // A reload is a fresh page load
        let reloads = self.browser.reload_count();
        if reloads > self.reloads_seen {
            self.reloads_seen = reloads;
            auth::boot(&self.ctx).await;
        }
        true
    }

    /// Active section, title, URL and any notices raised since the last call.
    pub fn report(&mut self) -> String {
        let mut out = String::new();
        let section = self.doc.active_section().unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "[{}] {}", section, self.doc.title());
        let _ = writeln!(out, "url: {}", self.browser.current_url());

        for (message, kind) in self.doc.take_notices() {
            let _ = writeln!(out, "{:?}: {}", kind, message);
        }

        if let Some(url) = self.browser.redirects().last() {
            if url.starts_with("http") {
                let _ = writeln!(out, "last redirect: {}", url);
            }
        }
        out
    }
}

async fn run_admin(ctx: &AppContext, panel: Panel, action: AdminAction) -> AppResult<()> {
    use admin::{cases, catalog, orders};

    match (panel, action) {
        (Panel::Catalog, AdminAction::List) => catalog::load_list(ctx).await,
        (Panel::Catalog, AdminAction::New) => {
            catalog::new_item(ctx);
            Ok(())
        }
        (Panel::Catalog, AdminAction::Edit(id)) => catalog::edit_item(ctx, &id),
        (Panel::Catalog, AdminAction::Save) => catalog::save(ctx).await,
        (Panel::Catalog, AdminAction::Delete(id)) => catalog::delete_item(ctx, &id).await.map(|_| ()),
        (Panel::Catalog, AdminAction::Cancel) => {
            catalog::cancel(ctx);
            Ok(())
        }
        (Panel::Cases, AdminAction::List) => cases::load_list(ctx).await,
        (Panel::Cases, AdminAction::New) => {
            cases::new_case(ctx);
            Ok(())
        }
        (Panel::Cases, AdminAction::Edit(id)) => cases::edit_case(ctx, &id).await,
        (Panel::Cases, AdminAction::Save) => cases::save(ctx).await,
        (Panel::Cases, AdminAction::Delete(id)) => cases::delete_case(ctx, &id).await.map(|_| ()),
        (Panel::Cases, AdminAction::Cancel) => {
            cases::cancel(ctx);
            Ok(())
        }
        (Panel::Orders, AdminAction::List) => orders::load_list(ctx).await,
        (Panel::Orders, AdminAction::New) => {
            orders::new_order(ctx);
            Ok(())
        }
        (Panel::Orders, AdminAction::Edit(id)) => orders::edit_order(ctx, &id),
        (Panel::Orders, AdminAction::Save) => orders::save(ctx).await,
        (Panel::Orders, AdminAction::Delete(id)) => orders::delete_order(ctx, &id).await.map(|_| ()),
        (Panel::Orders, AdminAction::Cancel) => {
            orders::cancel(ctx);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "open /leaderboard".parse::<Command>(),
            Ok(Command::Open("/leaderboard".into()))
        );
        assert_eq!(
            "set profileName Ana María".parse::<Command>(),
            Ok(Command::Set {
                id: "profileName".into(),
                value: "Ana María".into()
            })
        );
        assert_eq!(
            "callback ?code=abc&state=xyz".parse::<Command>(),
            Ok(Command::Callback("code=abc&state=xyz".into()))
        );
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
    }

    #[test]
    fn test_parse_admin_commands() {
        assert_eq!(
            "admin cases edit c1".parse::<Command>(),
            Ok(Command::Admin(Panel::Cases, AdminAction::Edit("c1".into())))
        );
        assert_eq!(
            "admin orders".parse::<Command>(),
            Ok(Command::Admin(Panel::Orders, AdminAction::List))
        );
        assert!("admin orders delete".parse::<Command>().is_err());
        assert!("admin users list".parse::<Command>().is_err());
    }

    #[test]
    fn test_missing_arguments() {
        assert!("open".parse::<Command>().is_err());
        assert!("token".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}
