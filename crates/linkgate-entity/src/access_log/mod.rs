//! Access log domain entities.

pub mod model;
pub mod store;

pub use model::{AccessLogEntry, CreateAccessLogEntry};
pub use store::AccessLogStore;
