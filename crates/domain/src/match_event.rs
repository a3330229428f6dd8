use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: Option<i64>,
    pub rule_id: i64,
    pub subject_name: Arc<str>,
    pub subject_address: Arc<str>,
    pub creator: Arc<str>,
    pub matched_value: Arc<str>,
    pub timestamp: DateTime<Utc>,
}
