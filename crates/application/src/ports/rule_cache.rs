use crate::services::CreatorRuleSet;
use async_trait::async_trait;
use regexblock_domain::{DomainError, MatchedBy, Rule};
use std::sync::Arc;

/// A positive decision remembered for one subject key.
#[derive(Debug, Clone)]
pub struct CachedBlock {
    pub rule: Arc<Rule>,
    pub matched_by: MatchedBy,
    pub matched_value: Arc<str>,
}

/// Outcome of one subject-cache compaction pass.
#[derive(Debug, Default, Clone)]
pub struct CacheCompactionOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Read-through cache in front of the rule store.
///
/// Rule sets are immutable snapshots; writers never mutate one in place, they
/// invalidate and let the next reader load a fresh one.
#[async_trait]
pub trait RuleCachePort: Send + Sync {
    /// Distinct creators, sorted.
    async fn creators(&self) -> Result<Arc<[Arc<str>]>, DomainError>;

    /// Rule sets for the given creators, in the same order.
    async fn get_rules_for(
        &self,
        creators: &[Arc<str>],
    ) -> Result<Vec<Arc<CreatorRuleSet>>, DomainError>;

    fn get_subject(&self, key: &str) -> Option<CachedBlock>;

    fn put_subject(&self, key: Arc<str>, block: CachedBlock);

    fn remove_subject(&self, key: &str);

    /// Drops one creator's rule set, every subject decision produced by
    /// that creator's rules and the creator list. Other creators' rule sets
    /// stay loaded.
    fn invalidate(&self, creator: &str);

    /// Drops everything, creator list included.
    fn invalidate_all(&self);

    /// Evicts subject decisions older than the configured TTL.
    fn compact(&self) -> CacheCompactionOutcome;
}
