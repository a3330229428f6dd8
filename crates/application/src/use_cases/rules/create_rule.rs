use crate::ports::{RuleCachePort, RuleRepository};
use crate::services::validate_new_rule;
use chrono::Utc;
use regexblock_domain::{AdminContext, DomainError, Expiry, NewRule, Rule, RuleKind};
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Default)]
pub struct CreateRuleCommand {
    pub pattern: String,
    /// Inferred from the pattern and `exact` when absent.
    pub kind: Option<RuleKind>,
    pub exact: bool,
    /// Administrative expiry input; `None` means the rule never expires.
    pub expiry: Option<String>,
    pub block_account_creation: bool,
    pub reason: Option<String>,
}

impl CreateRuleCommand {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }
}

pub struct CreateRuleUseCase {
    rule_repo: Arc<dyn RuleRepository>,
    cache: Arc<dyn RuleCachePort>,
}

impl CreateRuleUseCase {
    pub fn new(rule_repo: Arc<dyn RuleRepository>, cache: Arc<dyn RuleCachePort>) -> Self {
        Self { rule_repo, cache }
    }

    #[instrument(skip(self, ctx), fields(principal = %ctx.principal()))]
    pub async fn execute(
        &self,
        ctx: &AdminContext,
        command: CreateRuleCommand,
    ) -> Result<Rule, DomainError> {
        let expiry = match command.expiry.as_deref() {
            None => Expiry::Never,
            Some(input) => Expiry::parse_input(input, Utc::now())?,
        };
        self.create_with_expiry(ctx, command, expiry).await
    }

    /// Creation with an already parsed expiry, shared with the batch path.
    pub(crate) async fn create_with_expiry(
        &self,
        ctx: &AdminContext,
        command: CreateRuleCommand,
        expiry: Expiry,
    ) -> Result<Rule, DomainError> {
        expiry.ensure_future(Utc::now())?;

        let kind = command
            .kind
            .unwrap_or_else(|| RuleKind::infer(command.pattern.trim(), command.exact));
        let new_rule = NewRule::new(
            &command.pattern,
            kind,
            Arc::clone(ctx.principal()),
            expiry,
            command.block_account_creation,
            command.reason.as_deref(),
        )?;
        validate_new_rule(&new_rule)?;

        let rule = self.rule_repo.create(new_rule).await.map_err(|e| {
            if !e.is_validation() {
                error!(error = %e, "Failed to store rule");
            }
            e
        })?;

        self.cache.invalidate(&rule.creator);

        info!(
            rule_id = rule.id,
            pattern = %rule.pattern,
            kind = rule.kind.to_str(),
            expiry = %rule.expiry,
            "Rule created successfully"
        );

        Ok(rule)
    }
}
