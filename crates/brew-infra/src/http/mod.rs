//! HTTP transports - reqwest for real traffic, a scripted stub for offline runs.

mod memory;

#[cfg(feature = "http")]
mod remote;

pub use memory::StubTransport;

#[cfg(feature = "http")]
pub use remote::ReqwestTransport;
