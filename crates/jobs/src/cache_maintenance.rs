use regexblock_application::ports::RuleCachePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_COMPACTION_INTERVAL_SECS: u64 = 60;

/// Advances the cache clock and evicts subject decisions past their TTL.
pub struct CacheMaintenanceJob {
    cache: Arc<dyn RuleCachePort>,
    compaction_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(cache: Arc<dyn RuleCachePort>) -> Self {
        Self {
            cache,
            compaction_interval_secs: DEFAULT_COMPACTION_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, compaction_secs: u64) -> Self {
        self.compaction_interval_secs = compaction_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!("Starting rule cache maintenance job");

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.compaction_interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let outcome = self.cache.compact();
                        if outcome.entries_removed > 0 {
                            info!(
                                entries_removed = outcome.entries_removed,
                                cache_size = outcome.cache_size,
                                "Subject cache compaction completed"
                            );
                        } else {
                            debug!(cache_size = outcome.cache_size, "Subject cache compaction found nothing to evict");
                        }
                    }
                }
            }
        });
    }
}
