use crate::ports::RuleRepository;
use regexblock_domain::{DomainError, Pagination, Rule, RuleListFilter};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct RulePage {
    pub total: u64,
    pub rules: Vec<Rule>,
}

pub struct GetRulesUseCase {
    rule_repo: Arc<dyn RuleRepository>,
}

impl GetRulesUseCase {
    pub fn new(rule_repo: Arc<dyn RuleRepository>) -> Self {
        Self { rule_repo }
    }

    /// Newest rule first. Expired rules that were not purged yet are listed too.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &RuleListFilter,
        page: Pagination,
    ) -> Result<RulePage, DomainError> {
        let total = self.rule_repo.count(filter).await?;
        let rules = if total == 0 {
            Vec::new()
        } else {
            self.rule_repo.list(filter, page).await?
        };

        debug!(total, returned = rules.len(), "Rules listed");

        Ok(RulePage { total, rules })
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Rule, DomainError> {
        self.rule_repo
            .get_by_id(id)
            .await?
            .ok_or(DomainError::RuleNotFound(id))
    }

    /// Every principal that currently owns at least one rule, sorted.
    pub async fn blockers(&self) -> Result<Vec<Arc<str>>, DomainError> {
        self.rule_repo.list_distinct_creators().await
    }
}
