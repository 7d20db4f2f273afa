//! Host-supplied configuration for the deep-link subsystem.

// Note this file should stay restricted to simple struct definitions
// and defaults; behavior lives with the components that consume it.

use chrono::Duration;
use serde::Deserialize;

/// Storage key the delivery queue persists under. The queue owns this
/// key exclusively; no other component reads or writes it.
pub const QUEUE_STORAGE_KEY: &str = "trove.deeplink.queue";

/// Origins, schemes and policy knobs for link handling.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct LinkConfig {
    /// The single origin all inbound forms normalize to and all
    /// generated links use.
    pub canonical_origin: String,

    /// Alternate web domains accepted on inbound links.
    pub alias_origins: Vec<String>,

    /// Custom app schemes accepted on inbound links, without `://`.
    pub custom_schemes: Vec<String>,

    /// Base URL for existence probes, without a trailing slash.
    pub api_base: String,

    /// Hours a queued link may wait before it is discarded on restore.
    pub retention_hours: i64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            canonical_origin: "https://trove.app".to_string(),
            alias_origins: vec![
                "https://www.trove.app".to_string(),
                "https://links.trove.app".to_string(),
            ],
            custom_schemes: vec!["trove".to_string()],
            api_base: "https://api.trove.app/v1".to_string(),
            retention_hours: 24,
        }
    }
}

impl LinkConfig {
    /// Retention window as a duration for eviction math.
    pub fn retention(&self) -> Duration {
        Duration::hours(self.retention_hours)
    }
}
