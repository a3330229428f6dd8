use crate::expiry::Expiry;
use crate::rule::Rule;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedBy {
    Address,
    Name,
    Regex,
}

impl MatchedBy {
    pub fn to_str(&self) -> &'static str {
        match self {
            MatchedBy::Address => "address",
            MatchedBy::Name => "name",
            MatchedBy::Regex => "regex",
        }
    }

    fn default_reason(&self) -> &'static str {
        match self {
            MatchedBy::Address => "Your IP address has been blocked",
            MatchedBy::Name => "Your username has been blocked",
            MatchedBy::Regex => "Your username matches a blocked pattern",
        }
    }
}

/// Outcome of a block check. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub blocked: bool,
    pub rule_id: Option<i64>,
    pub matched_by: Option<MatchedBy>,
    pub matched_value: Option<Arc<str>>,
    pub creator: Option<Arc<str>>,
    pub reason: Option<Arc<str>>,
    pub expiry: Option<Expiry>,
    pub block_account_creation: bool,
}

impl Decision {
    pub fn not_blocked() -> Self {
        Self {
            blocked: false,
            rule_id: None,
            matched_by: None,
            matched_value: None,
            creator: None,
            reason: None,
            expiry: None,
            block_account_creation: false,
        }
    }

    pub fn blocked_by(rule: &Rule, matched_by: MatchedBy, matched_value: Arc<str>) -> Self {
        Self {
            blocked: true,
            rule_id: Some(rule.id),
            matched_by: Some(matched_by),
            matched_value: Some(matched_value),
            creator: Some(rule.creator.clone()),
            reason: rule.reason.clone(),
            expiry: Some(rule.expiry),
            block_account_creation: rule.block_account_creation,
        }
    }

    /// The rule's own reason, or a generic one for the kind of match.
    pub fn display_reason(&self) -> Option<&str> {
        if !self.blocked {
            return None;
        }
        self.reason
            .as_deref()
            .or_else(|| self.matched_by.map(|m| m.default_reason()))
    }
}
