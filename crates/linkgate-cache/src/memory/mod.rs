//! In-process counter cache backend.

pub mod store;

pub use store::MemoryCounterCache;
