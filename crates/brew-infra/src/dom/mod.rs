//! Document implementations.

mod memory;

pub use memory::InMemoryDocument;
