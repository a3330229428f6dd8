//! RegexBlock Domain Layer
pub mod admin_context;
pub mod config;
pub mod decision;
pub mod errors;
pub mod expiry;
pub mod match_event;
pub mod rule;
pub mod rule_filter;
pub mod subject;

pub use admin_context::AdminContext;
pub use config::{CliOverrides, Config, ConfigError};
pub use decision::{Decision, MatchedBy};
pub use errors::DomainError;
pub use expiry::Expiry;
pub use match_event::MatchEvent;
pub use rule::{NewRule, Rule, RuleKind};
pub use rule_filter::{Pagination, RuleListFilter};
pub use subject::{parse_ip_literal, sanitize_address, Subject};
