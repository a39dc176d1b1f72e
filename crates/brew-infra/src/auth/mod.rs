//! Token inspection implementations.

mod jwt;

pub use jwt::JwtTokenDecoder;
