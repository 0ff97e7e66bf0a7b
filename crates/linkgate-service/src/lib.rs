//! # linkgate-service
//!
//! Business logic service layer for LinkGate. Each service orchestrates
//! stores and the counter cache to implement application-level use
//! cases, from issuing and revoking links to admitting access requests.
//!
//! Services receive every dependency at construction time as an `Arc`
//! reference; nothing is looked up globally.

pub mod guard;
pub mod link;
pub mod password;
pub mod token;

pub use guard::{AccessRequest, AdmissionGuard, BanGuard, GuardChain, RateLimitGuard};
pub use link::{AdmissionService, AdmitOutcome, CreateLinkRequest, LinkService};
pub use password::PasswordHasher;
pub use token::TokenGenerator;
