use crate::ports::{RuleCachePort, RuleRepository};
use regexblock_domain::{parse_ip_literal, AdminContext, DomainError, Rule};
use std::sync::Arc;
use tracing::{error, info, instrument};

pub struct DeleteRuleUseCase {
    rule_repo: Arc<dyn RuleRepository>,
    cache: Arc<dyn RuleCachePort>,
}

impl DeleteRuleUseCase {
    pub fn new(rule_repo: Arc<dyn RuleRepository>, cache: Arc<dyn RuleCachePort>) -> Self {
        Self { rule_repo, cache }
    }

    /// Removes the rule with this exact pattern. Returns `false` when nothing
    /// was blocked under it.
    #[instrument(skip(self, ctx), fields(principal = %ctx.principal()))]
    pub async fn execute(&self, ctx: &AdminContext, pattern: &str) -> Result<bool, DomainError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Ok(false);
        }

        let mut removed = self.delete(pattern).await?;
        if removed.is_none() {
            // IP rules are stored canonicalized.
            if let Some(ip) = parse_ip_literal(pattern).map(|ip| ip.to_string()) {
                if ip != pattern {
                    removed = self.delete(&ip).await?;
                }
            }
        }

        let Some(rule) = removed else {
            info!(pattern = %pattern, "Nothing to unblock");
            return Ok(false);
        };

        self.cache.invalidate(&rule.creator);

        info!(
            rule_id = rule.id,
            pattern = %rule.pattern,
            creator = %rule.creator,
            "Rule deleted successfully"
        );

        Ok(true)
    }

    async fn delete(&self, pattern: &str) -> Result<Option<Rule>, DomainError> {
        self.rule_repo.delete_by_pattern(pattern).await.map_err(|e| {
            error!(pattern = %pattern, error = %e, "Failed to delete rule");
            e
        })
    }
}
