//! In-process store implementations backed by concurrent maps.
//!
//! Used by tests and by embedders that want the lifecycle engine without
//! a PostgreSQL deployment. Per-key atomicity comes from holding the map
//! entry lock across the whole conditional update, mirroring the
//! single-`UPDATE` guarantee of the SQL backend.

pub mod access_log;
pub mod link;

pub use access_log::MemoryAccessLogStore;
pub use link::MemoryLinkStore;
