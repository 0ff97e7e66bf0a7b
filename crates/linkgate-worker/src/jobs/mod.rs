//! Built-in maintenance jobs.

pub mod expiry;
