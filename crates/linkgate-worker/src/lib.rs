//! Background maintenance for LinkGate.
//!
//! This crate provides:
//! - The expiry sweep job that moves overdue links to `expired` and
//!   prunes aged access-log rows
//! - An interval runner that repeats the sweep until cancelled

pub mod jobs;
pub mod runner;

pub use jobs::expiry::{SweepJob, SweepReport};
pub use runner::SweeperRunner;
