//! Shareable-link domain entities and lifecycle rules.

pub mod command;
pub mod lifecycle;
pub mod model;
pub mod status;
pub mod store;

pub use command::{LinkCommand, UpdateCondition};
pub use lifecycle::{AccessDecision, DenialReason};
pub use model::{CreateLink, Link};
pub use status::LinkStatus;
pub use store::LinkStore;
