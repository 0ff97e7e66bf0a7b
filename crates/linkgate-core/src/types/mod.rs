//! Core type definitions used across the LinkGate workspace.

pub mod id;

pub use id::{FileId, LinkId, UserId};
