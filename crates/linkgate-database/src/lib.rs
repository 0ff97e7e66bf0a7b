//! # linkgate-database
//!
//! PostgreSQL connection management and concrete store implementations
//! for LinkGate, plus in-process stores backed by concurrent maps for
//! embedding and tests. Both backends implement the same store seams
//! and agree on update semantics command for command.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::{MemoryAccessLogStore, MemoryLinkStore};
pub use repositories::{PgAccessLogStore, PgLinkStore};
