use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Upper bound for one block check, cache misses included. Past it the
    /// check fails open.
    #[serde(default = "default_check_timeout_ms")]
    pub check_timeout_ms: u64,

    #[serde(default = "default_subject_cache_ttl_secs")]
    pub subject_cache_ttl_secs: u64,

    /// Maintenance mode: blocks are still enforced but matches are not recorded.
    #[serde(default)]
    pub read_only: bool,

    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            check_timeout_ms: default_check_timeout_ms(),
            subject_cache_ttl_secs: default_subject_cache_ttl_secs(),
            read_only: false,
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

fn default_check_timeout_ms() -> u64 {
    250
}

fn default_subject_cache_ttl_secs() -> u64 {
    30 * 86_400
}

fn default_purge_interval_secs() -> u64 {
    3_600
}
