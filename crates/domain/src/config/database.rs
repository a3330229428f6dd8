use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a writer waits on SQLite's lock before giving up. Admin writes
    /// surface the resulting error; the hot path fails open long before this.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

fn default_db_path() -> String {
    "./regexblock.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}

fn default_busy_timeout_secs() -> u64 {
    5
}
