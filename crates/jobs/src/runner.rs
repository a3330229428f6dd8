use crate::{CacheMaintenanceJob, ExpiredRulePurgeJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct JobRunner {
    expired_rule_purge: Option<ExpiredRulePurgeJob>,
    cache_maintenance: Option<CacheMaintenanceJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            expired_rule_purge: None,
            cache_maintenance: None,
            shutdown: None,
        }
    }

    pub fn with_expired_rule_purge(mut self, job: ExpiredRulePurgeJob) -> Self {
        self.expired_rule_purge = Some(job);
        self
    }

    pub fn with_cache_maintenance(mut self, job: CacheMaintenanceJob) -> Self {
        self.cache_maintenance = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(mut job) = self.expired_rule_purge {
            if let Some(token) = &self.shutdown {
                job = job.with_cancellation(token.clone());
            }
            Arc::new(job).start().await;
        }

        if let Some(mut job) = self.cache_maintenance {
            if let Some(token) = &self.shutdown {
                job = job.with_cancellation(token.clone());
            }
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
