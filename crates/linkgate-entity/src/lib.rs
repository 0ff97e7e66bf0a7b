//! # linkgate-entity
//!
//! Domain entity models for LinkGate. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The link lifecycle engine also lives here: accessibility evaluation is
//! a pure function of a [`link::Link`] and a caller-supplied clock, and
//! every mutation of a stored link is expressed as a batch of
//! [`link::LinkCommand`]s that a store applies atomically.

pub mod access_log;
pub mod link;
