use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regexblock_domain::{DomainError, NewRule, Pagination, Rule, RuleListFilter};
use std::sync::Arc;

#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Inserts a rule. An active rule with the same pattern is a conflict; an
    /// expired one is replaced.
    async fn create(&self, rule: NewRule) -> Result<Rule, DomainError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Rule>, DomainError>;

    /// Deletes by exact pattern and returns the removed rule, if any.
    async fn delete_by_pattern(&self, pattern: &str) -> Result<Option<Rule>, DomainError>;

    /// Deletes the rule only if it is still expired at `now`.
    async fn delete_expired_by_id(&self, id: i64, now: DateTime<Utc>)
        -> Result<bool, DomainError>;

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Rule>, DomainError>;

    /// Live rules of one creator, newest first.
    async fn list_active_by_creator(
        &self,
        creator: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Rule>, DomainError>;

    async fn list_distinct_creators(&self) -> Result<Vec<Arc<str>>, DomainError>;

    async fn list(
        &self,
        filter: &RuleListFilter,
        page: Pagination,
    ) -> Result<Vec<Rule>, DomainError>;

    async fn count(&self, filter: &RuleListFilter) -> Result<u64, DomainError>;
}
