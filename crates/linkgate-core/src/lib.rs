//! # linkgate-core
//!
//! Core crate for LinkGate. Contains configuration schemas, typed
//! identifiers, the collaborator trait seams, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other LinkGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
