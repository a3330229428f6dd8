mod block_matcher;
mod pattern;
mod rule_set;

pub use block_matcher::{match_subject, MatchOutcome, RuleHit};
pub use pattern::{compile_pattern, validate_new_rule};
pub use rule_set::{CompiledRegexRule, CreatorRuleSet};
