//! # Brew Infrastructure
//!
//! Concrete implementations of the ports defined in `brew-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory adapters only
//! - `http` - reqwest-backed HTTP transport
//! - `jwt` - JWT claims decoding via jsonwebtoken

pub mod browser;
pub mod dom;
pub mod http;
pub mod storage;

#[cfg(feature = "jwt")]
pub mod auth;

// Re-exports - In-Memory
pub use browser::HeadlessBrowser;
pub use dom::InMemoryDocument;
pub use http::StubTransport;
pub use storage::{InMemoryStorage, JsonFileStorage};

#[cfg(feature = "http")]
pub use http::ReqwestTransport;

#[cfg(feature = "jwt")]
pub use auth::JwtTokenDecoder;
