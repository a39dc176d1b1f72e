//! Storage implementations - in-memory (`sessionStorage`) and JSON file
//! (`localStorage` that survives restarts).

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::InMemoryStorage;
