//! # linkgate-cache
//!
//! Counter cache implementations for LinkGate. The admission path needs
//! nothing more than TTL-bounded atomic counters, so that is all this
//! crate provides: an in-process backend over a concurrent map, plus the
//! key builders every caller must go through.
//!
//! The backend is selected at runtime based on configuration.

pub mod keys;
pub mod memory;
pub mod provider;

pub use memory::MemoryCounterCache;
pub use provider::build_counter_cache;
