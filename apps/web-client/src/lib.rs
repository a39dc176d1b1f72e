//! # Brew Detective client
//!
//! Session handling, API helper, router and page controllers of the Brew
//! Detective coffee-tasting game. Rendering goes through the `Document`
//! port, so the same controllers drive a browser page or the headless
//! in-memory document used by the console driver and the tests.

pub mod api;
pub mod auth;
pub mod auth_ui;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod layout;
pub mod pages;
pub mod router;
pub mod session;
pub mod telemetry;

pub use api::ApiClient;
pub use config::AppConfig;
pub use context::{AppContext, Ports};
pub use error::{AppError, AppResult};
pub use session::Session;
