//! # Brew Shared
//!
//! Wire envelopes exchanged with the Brew Detective backend.
//! Envelopes are generic over the record type so this crate stays free of
//! the client's domain model.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, MessageResponse};
