use crate::errors::DomainError;
use crate::expiry::Expiry;
use crate::subject::parse_ip_literal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

const MAX_PATTERN_LEN: usize = 255;
const MAX_REASON_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ExactName,
    Regex,
    IpLiteral,
}

impl RuleKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            RuleKind::ExactName => "exact",
            RuleKind::Regex => "regex",
            RuleKind::IpLiteral => "ip",
        }
    }

    /// Kind an administrative caller gets when it does not name one: IP
    /// literals are always address rules, `exact` picks a name rule, anything
    /// else is a regular expression.
    pub fn infer(pattern: &str, exact: bool) -> Self {
        if parse_ip_literal(pattern).is_some() {
            RuleKind::IpLiteral
        } else if exact {
            RuleKind::ExactName
        } else {
            RuleKind::Regex
        }
    }
}

impl FromStr for RuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "exact_name" | "name" => Ok(RuleKind::ExactName),
            "regex" => Ok(RuleKind::Regex),
            "ip" | "ip_literal" | "address" => Ok(RuleKind::IpLiteral),
            other => Err(DomainError::InvalidPattern(format!(
                "unknown rule kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub pattern: Arc<str>,
    pub kind: RuleKind,
    pub creator: Arc<str>,
    pub created_at: DateTime<Utc>,
    pub expiry: Expiry,
    pub block_account_creation: bool,
    pub reason: Option<Arc<str>>,
}

impl Rule {
    #[inline]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_live_at(now)
    }
}

/// Input of a rule creation, validated before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRule {
    pub pattern: String,
    pub kind: RuleKind,
    pub creator: Arc<str>,
    pub expiry: Expiry,
    pub block_account_creation: bool,
    pub reason: Option<String>,
}

impl NewRule {
    pub fn new(
        pattern: &str,
        kind: RuleKind,
        creator: Arc<str>,
        expiry: Expiry,
        block_account_creation: bool,
        reason: Option<&str>,
    ) -> Result<Self, DomainError> {
        let pattern = Self::normalize_pattern(pattern, kind)?;
        Ok(Self {
            pattern,
            kind,
            creator,
            expiry,
            block_account_creation,
            reason: Self::normalize_reason(reason),
        })
    }

    /// Checks shape only; regex compilation is done by the application layer.
    pub fn normalize_pattern(pattern: &str, kind: RuleKind) -> Result<String, DomainError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(DomainError::InvalidPattern(
                "Pattern cannot be empty".to_string(),
            ));
        }
        if pattern.chars().count() > MAX_PATTERN_LEN {
            return Err(DomainError::InvalidPattern(format!(
                "Pattern cannot exceed {} characters",
                MAX_PATTERN_LEN
            )));
        }
        match kind {
            RuleKind::IpLiteral => parse_ip_literal(pattern)
                .map(|ip| ip.to_string())
                .ok_or_else(|| {
                    DomainError::InvalidPattern(format!("'{}' is not an IP address", pattern))
                }),
            RuleKind::ExactName | RuleKind::Regex => Ok(pattern.to_string()),
        }
    }

    fn normalize_reason(reason: Option<&str>) -> Option<String> {
        reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| r.chars().take(MAX_REASON_LEN).collect())
    }
}
