use crate::ports::{MatchEventRepository, RuleRepository};
use regexblock_domain::{DomainError, MatchEvent, Pagination, Rule};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct RuleStats {
    pub rule: Rule,
    pub total: u64,
    /// Newest first.
    pub events: Vec<MatchEvent>,
}

pub struct GetRuleStatsUseCase {
    rule_repo: Arc<dyn RuleRepository>,
    match_repo: Arc<dyn MatchEventRepository>,
}

impl GetRuleStatsUseCase {
    pub fn new(
        rule_repo: Arc<dyn RuleRepository>,
        match_repo: Arc<dyn MatchEventRepository>,
    ) -> Self {
        Self {
            rule_repo,
            match_repo,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, rule_id: i64, page: Pagination) -> Result<RuleStats, DomainError> {
        let rule = self
            .rule_repo
            .get_by_id(rule_id)
            .await?
            .ok_or(DomainError::RuleNotFound(rule_id))?;

        let total = self.match_repo.count_by_rule(rule_id).await?;
        let events = if total == 0 {
            Vec::new()
        } else {
            self.match_repo.list_by_rule(rule_id, page).await?
        };

        Ok(RuleStats {
            rule,
            total,
            events,
        })
    }
}
