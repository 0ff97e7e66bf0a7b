//! # LinkGate
//!
//! Shareable-link lifecycle core: issue, validate, and revoke
//! time-bounded, access-limited links to files held in a private backing
//! store, counting each admitted access exactly once under concurrency.
//!
//! This crate is the composition facade. It wires the workspace crates
//! into a running instance ([`LinkGate`]) and re-exports the public API.
//! Byte delivery, command parsing, and user management stay with the
//! embedding application; it supplies a [`UserDirectory`] and serves the
//! `file_id` a permitted admission hands back.
//!
//! ```no_run
//! use std::sync::Arc;
//! use linkgate::{AccessRequest, AdmitOutcome, AppConfig, LinkGate};
//! # use linkgate::{AppResult, UserDirectory, UserId};
//! # #[derive(Debug)]
//! # struct Directory;
//! # #[async_trait::async_trait]
//! # impl UserDirectory for Directory {
//! #     async fn is_banned(&self, _: UserId) -> AppResult<bool> { Ok(false) }
//! #     async fn active_link_quota(&self, _: UserId) -> AppResult<Option<i64>> { Ok(None) }
//! # }
//!
//! # async fn demo() -> AppResult<()> {
//! let config = AppConfig::load("production")?;
//! let app = LinkGate::connect(config, Arc::new(Directory)).await?;
//!
//! let request = AccessRequest::new("aB3xK9mQ2pLw".into());
//! match app.admission().admit(&request).await? {
//!     AdmitOutcome::Permitted { link } => println!("serve {}", link.file_id),
//!     AdmitOutcome::Denied(reason) => println!("denied: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;

pub use app::LinkGate;

pub use linkgate_core::config::{AppConfig, DatabaseConfig};
pub use linkgate_core::error::{AppError, ErrorKind};
pub use linkgate_core::result::AppResult;
pub use linkgate_core::traits::{CounterCache, UserDirectory};
pub use linkgate_core::types::{FileId, LinkId, UserId};

pub use linkgate_entity::access_log::{AccessLogEntry, AccessLogStore, CreateAccessLogEntry};
pub use linkgate_entity::link::{
    AccessDecision, CreateLink, DenialReason, Link, LinkCommand, LinkStatus, LinkStore,
    UpdateCondition,
};

pub use linkgate_database::{
    DatabasePool, MemoryAccessLogStore, MemoryLinkStore, PgAccessLogStore, PgLinkStore,
};

pub use linkgate_service::{
    AccessRequest, AdmissionGuard, AdmissionService, AdmitOutcome, BanGuard, CreateLinkRequest,
    GuardChain, LinkService, PasswordHasher, RateLimitGuard, TokenGenerator,
};

pub use linkgate_worker::{SweepJob, SweepReport, SweeperRunner};

use tracing_subscriber::{EnvFilter, fmt};

use linkgate_core::config::LoggingConfig;

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` wins over the configured level when set. Call once, from
/// the outermost binary.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
