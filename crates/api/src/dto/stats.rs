use super::rule::RuleResponse;
use regexblock_application::use_cases::RuleStats;
use regexblock_domain::MatchEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEventResponse {
    pub id: i64,
    pub subject_name: String,
    pub subject_address: String,
    pub matched_value: String,
    pub timestamp: String,
}

impl MatchEventResponse {
    pub fn from_domain(e: MatchEvent) -> Self {
        Self {
            id: e.id.unwrap_or(0),
            subject_name: e.subject_name.to_string(),
            subject_address: e.subject_address.to_string(),
            matched_value: e.matched_value.to_string(),
            timestamp: e.timestamp.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleStatsResponse {
    pub rule: RuleResponse,
    pub total: u64,
    pub events: Vec<MatchEventResponse>,
}

impl RuleStatsResponse {
    pub fn from_domain(stats: RuleStats) -> Self {
        Self {
            rule: RuleResponse::from_domain(stats.rule),
            total: stats.total,
            events: stats
                .events
                .into_iter()
                .map(MatchEventResponse::from_domain)
                .collect(),
        }
    }
}
