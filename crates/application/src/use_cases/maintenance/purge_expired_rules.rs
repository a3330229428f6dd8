use crate::ports::{RuleCachePort, RuleRepository};
use chrono::Utc;
use regexblock_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct PurgeExpiredRulesUseCase {
    rule_repo: Arc<dyn RuleRepository>,
    cache: Arc<dyn RuleCachePort>,
}

impl PurgeExpiredRulesUseCase {
    pub fn new(rule_repo: Arc<dyn RuleRepository>, cache: Arc<dyn RuleCachePort>) -> Self {
        Self { rule_repo, cache }
    }

    /// Deletes every rule expired as of now and returns how many went away.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<u64, DomainError> {
        let purged = self.rule_repo.purge_expired(Utc::now()).await?;
        if purged.is_empty() {
            return Ok(0);
        }

        // A purge can empty a creator, so the creator list goes too.
        self.cache.invalidate_all();

        info!(purged = purged.len(), "Expired rules purged");
        Ok(purged.len() as u64)
    }
}
