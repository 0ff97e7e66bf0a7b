//! Link issuance, listing, revocation, and access admission.

pub mod admission;
pub mod service;

pub use admission::{AdmissionService, AdmitOutcome};
pub use service::{CreateLinkRequest, LinkService};
