//! # Brew Core
//!
//! The domain layer of the Brew Detective client.
//! Plain view-model data and the rules that shape it, plus the ports the
//! client talks through. No I/O lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
