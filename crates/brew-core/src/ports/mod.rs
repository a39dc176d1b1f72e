//! Ports - trait definitions for everything outside the client's own logic.
//! Infrastructure (or a browser binding) must implement these.

mod auth;
mod browser;
mod dom;
mod http;
mod storage;

pub use auth::{AuthError, TokenClaims, TokenDecoder};
pub use browser::{Browser, Location};
pub use dom::{Document, NoticeKind, Row, SelectOption};
pub use http::{HttpRequest, HttpResponse, Method, Transport, TransportError};
pub use storage::{Storage, StorageError};
