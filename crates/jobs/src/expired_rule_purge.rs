use regexblock_application::use_cases::PurgeExpiredRulesUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Periodically deletes expired rules so the table does not rely on lazy
/// removal alone.
pub struct ExpiredRulePurgeJob {
    purge: Arc<PurgeExpiredRulesUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ExpiredRulePurgeJob {
    pub fn new(purge: Arc<PurgeExpiredRulesUseCase>) -> Self {
        Self {
            purge,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting expired rule purge job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ExpiredRulePurgeJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.purge.execute().await {
                            Ok(0) => {}
                            Ok(purged) => {
                                info!(purged, "Expired rule purge completed");
                            }
                            Err(e) => {
                                error!(error = %e, "Expired rule purge failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
