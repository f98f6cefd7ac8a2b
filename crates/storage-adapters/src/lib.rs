//! # storage-adapters
//!
//! Concrete implementations of the persistence and blob-storage ports:
//! an in-process document store with per-document atomic updates, and a
//! content-addressable local-filesystem media store.

pub mod media_local;
pub mod memory;

pub use media_local::LocalMediaStore;
pub use memory::MemoryStore;
