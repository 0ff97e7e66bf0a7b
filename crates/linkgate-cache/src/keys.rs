//! Cache key builders for all LinkGate cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use linkgate_core::types::UserId;

/// Prefix applied to all LinkGate cache keys.
const PREFIX: &str = "linkgate";

/// Cache key for an admission rate-limit bucket keyed by accessor id.
pub fn admission_rate_limit_user(user_id: UserId) -> String {
    format!("{PREFIX}:rate:admit:user:{user_id}")
}

/// Cache key for an admission rate-limit bucket keyed by source address.
pub fn admission_rate_limit_addr(addr: &str) -> String {
    format!("{PREFIX}:rate:admit:addr:{addr}")
}
