use regexblock_application::use_cases::{BatchFailure, BatchOutcome};
use regexblock_domain::Rule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResponse {
    pub id: i64,
    pub pattern: String,
    pub kind: String,
    pub creator: String,
    pub created_at: String,
    pub expiry: String,
    pub block_account_creation: bool,
    pub reason: Option<String>,
}

impl RuleResponse {
    pub fn from_domain(r: Rule) -> Self {
        Self {
            id: r.id,
            pattern: r.pattern.to_string(),
            kind: r.kind.to_str().to_string(),
            creator: r.creator.to_string(),
            created_at: r.created_at.to_rfc3339(),
            expiry: r.expiry.to_string(),
            block_account_creation: r.block_account_creation,
            reason: r.reason.as_ref().map(|s| s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRuleRequest {
    pub pattern: String,
    pub kind: Option<String>,
    pub exact: Option<bool>,
    pub expiry: Option<String>,
    pub block_account_creation: Option<bool>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub patterns: Vec<String>,
    pub expiry: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchErrorResponse {
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub created: Vec<RuleResponse>,
    pub errors: Vec<BatchErrorResponse>,
}

impl BatchResponse {
    pub fn from_outcome(outcome: BatchOutcome) -> Self {
        Self {
            created: outcome
                .created
                .into_iter()
                .map(RuleResponse::from_domain)
                .collect(),
            errors: outcome
                .failed
                .into_iter()
                .map(|BatchFailure { pattern, error }| BatchErrorResponse {
                    pattern,
                    error: error.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleListQuery {
    pub creator: Option<String>,
    pub subject: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleListResponse {
    pub total: u64,
    pub rules: Vec<RuleResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnblockRequest {
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnblockResponse {
    pub status: String,
}

impl UnblockResponse {
    pub fn from_removed(removed: bool) -> Self {
        Self {
            status: if removed { "ok" } else { "fail" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadOnlyRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOnlyResponse {
    pub read_only: bool,
}
