use super::create_rule::{CreateRuleCommand, CreateRuleUseCase};
use chrono::Utc;
use regexblock_domain::{AdminContext, DomainError, Expiry, Rule, RuleKind};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct CreateRulesBatchCommand {
    pub patterns: Vec<String>,
    pub expiry: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub pattern: String,
    pub error: DomainError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub created: Vec<Rule>,
    pub failed: Vec<BatchFailure>,
}

/// Blocks a list of regular expressions in one call. Every rule also blocks
/// account creation. A failing pattern is reported and the rest go on.
pub struct CreateRulesBatchUseCase {
    create_rule: Arc<CreateRuleUseCase>,
}

impl CreateRulesBatchUseCase {
    pub fn new(create_rule: Arc<CreateRuleUseCase>) -> Self {
        Self { create_rule }
    }

    #[instrument(skip(self, ctx, command), fields(principal = %ctx.principal(), count = command.patterns.len()))]
    pub async fn execute(
        &self,
        ctx: &AdminContext,
        command: CreateRulesBatchCommand,
    ) -> Result<BatchOutcome, DomainError> {
        let expiry = match command.expiry.as_deref() {
            None => Expiry::Never,
            Some(input) => Expiry::parse_input(input, Utc::now())?,
        };

        let patterns = preprocess_patterns(&command.patterns);
        if patterns.is_empty() {
            return Err(DomainError::InvalidPattern(
                "No patterns to block".to_string(),
            ));
        }

        let mut outcome = BatchOutcome::default();
        for pattern in patterns {
            let rule_command = CreateRuleCommand {
                pattern: pattern.clone(),
                kind: Some(RuleKind::Regex),
                exact: false,
                expiry: None,
                block_account_creation: true,
                reason: command.reason.clone(),
            };

            match self
                .create_rule
                .create_with_expiry(ctx, rule_command, expiry)
                .await
            {
                Ok(rule) => outcome.created.push(rule),
                Err(error) => {
                    warn!(pattern = %pattern, error = %error, "Batch pattern rejected");
                    outcome.failed.push(BatchFailure { pattern, error });
                }
            }
        }

        info!(
            created = outcome.created.len(),
            failed = outcome.failed.len(),
            "Batch block finished"
        );

        Ok(outcome)
    }
}

/// Splits embedded newlines, trims and drops blank lines.
fn preprocess_patterns(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.lines())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_drops_blank_lines() {
        let raw = vec![
            "Spam.*\n\n  Vandal[0-9]+ ".to_string(),
            "   ".to_string(),
            "Troll".to_string(),
        ];
        assert_eq!(
            preprocess_patterns(&raw),
            vec!["Spam.*", "Vandal[0-9]+", "Troll"]
        );
    }
}
