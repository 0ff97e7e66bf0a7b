//! Link issuing policy configuration.

use serde::{Deserialize, Serialize};

/// Policy applied when links are created and listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPolicyConfig {
    /// Default lifetime of a new link in days. `0` means links never
    /// expire unless the creator sets an explicit lifetime.
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: i64,
    /// Number of random characters in a generated link identifier.
    #[serde(default = "default_link_id_length")]
    pub link_id_length: usize,
    /// Number of random bytes in a generated file handle.
    #[serde(default = "default_file_handle_bytes")]
    pub file_handle_bytes: usize,
    /// Maximum number of rows returned by listing queries.
    #[serde(default = "default_list_limit")]
    pub list_limit: i64,
}

impl Default for LinkPolicyConfig {
    fn default() -> Self {
        Self {
            default_expiry_days: default_expiry_days(),
            link_id_length: default_link_id_length(),
            file_handle_bytes: default_file_handle_bytes(),
            list_limit: default_list_limit(),
        }
    }
}

fn default_expiry_days() -> i64 {
    7
}

fn default_link_id_length() -> usize {
    12
}

fn default_file_handle_bytes() -> usize {
    16
}

fn default_list_limit() -> i64 {
    50
}
