//! Core traits defined in `linkgate-core` and implemented by other crates.

pub mod cache;
pub mod directory;

pub use cache::CounterCache;
pub use directory::UserDirectory;
