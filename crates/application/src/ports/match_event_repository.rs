use async_trait::async_trait;
use regexblock_domain::{DomainError, MatchEvent, Pagination};

#[async_trait]
pub trait MatchEventRepository: Send + Sync {
    async fn record(&self, event: &MatchEvent) -> Result<i64, DomainError>;

    async fn list_by_rule(
        &self,
        rule_id: i64,
        page: Pagination,
    ) -> Result<Vec<MatchEvent>, DomainError>;

    async fn count_by_rule(&self, rule_id: i64) -> Result<u64, DomainError>;
}
