//! PostgreSQL store implementations for all LinkGate entities.

pub mod access_log;
pub mod link;

pub use access_log::PgAccessLogStore;
pub use link::PgLinkStore;
