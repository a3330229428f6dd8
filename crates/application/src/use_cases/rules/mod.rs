mod create_rule;
mod create_rules_batch;
mod delete_rule;
mod get_rule_stats;
mod get_rules;

pub use create_rule::{CreateRuleCommand, CreateRuleUseCase};
pub use create_rules_batch::{
    BatchFailure, BatchOutcome, CreateRulesBatchCommand, CreateRulesBatchUseCase,
};
pub use delete_rule::DeleteRuleUseCase;
pub use get_rule_stats::{GetRuleStatsUseCase, RuleStats};
pub use get_rules::{GetRulesUseCase, RulePage};
