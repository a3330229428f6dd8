use fancy_regex::{Regex, RegexBuilder};
use regexblock_domain::{DomainError, NewRule, RuleKind};

const BACKTRACK_LIMIT: usize = 100_000;

/// Compiles a block pattern the way the evaluator runs it: case-insensitive,
/// with a bounded backtracking budget.
pub fn compile_pattern(pattern: &str) -> Result<Regex, DomainError> {
    RegexBuilder::new(&format!("(?i){}", pattern))
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
        .map_err(|e| {
            DomainError::InvalidPattern(format!("Invalid regex pattern '{}': {}", pattern, e))
        })
}

/// Compile-and-discard check run before a regex rule is stored.
pub fn validate_new_rule(rule: &NewRule) -> Result<(), DomainError> {
    if rule.kind == RuleKind::Regex {
        compile_pattern(&rule.pattern)?;
    }
    Ok(())
}
