use regexblock_domain::Decision;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub exempt: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub blocked: bool,
    pub rule_id: Option<i64>,
    pub matched_by: Option<String>,
    pub matched_value: Option<String>,
    pub creator: Option<String>,
    /// The rule's reason, or the generic one for the kind of match.
    pub reason: Option<String>,
    pub expiry: Option<String>,
    pub block_account_creation: bool,
}

impl DecisionResponse {
    pub fn from_domain(d: Decision) -> Self {
        Self {
            blocked: d.blocked,
            rule_id: d.rule_id,
            matched_by: d.matched_by.map(|m| m.to_str().to_string()),
            matched_value: d.matched_value.as_ref().map(|s| s.to_string()),
            creator: d.creator.as_ref().map(|s| s.to_string()),
            reason: d.display_reason().map(str::to_string),
            expiry: d.expiry.map(|e| e.to_string()),
            block_account_creation: d.block_account_creation,
        }
    }
}
