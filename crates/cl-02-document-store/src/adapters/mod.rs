//! Adapters layer.

pub mod memory;

pub use memory::InMemoryDocumentStore;
