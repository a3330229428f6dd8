use crate::ports::{CachedBlock, MatchEventRepository, RuleCachePort, RuleRepository};
use crate::services::{match_subject, RuleHit};
use chrono::{DateTime, Utc};
use regexblock_domain::{Decision, DomainError, MatchEvent, Rule, Subject};
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_millis(250);

/// Hot-path evaluator called by the host on every protected action.
///
/// Never fails outward: store errors and timeouts allow the subject through
/// and are logged at `warn`.
pub struct CheckBlockUseCase {
    rule_repo: Arc<dyn RuleRepository>,
    match_repo: Arc<dyn MatchEventRepository>,
    cache: Arc<dyn RuleCachePort>,
    timeout: Duration,
    read_only: Arc<AtomicBool>,
    purging: Arc<Mutex<FxHashSet<i64>>>,
}

impl CheckBlockUseCase {
    pub fn new(
        rule_repo: Arc<dyn RuleRepository>,
        match_repo: Arc<dyn MatchEventRepository>,
        cache: Arc<dyn RuleCachePort>,
    ) -> Self {
        Self {
            rule_repo,
            match_repo,
            cache,
            timeout: DEFAULT_CHECK_TIMEOUT,
            read_only: Arc::new(AtomicBool::new(false)),
            purging: Arc::new(Mutex::new(FxHashSet::default())),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shares the read-only switch with whoever toggles it at runtime.
    pub fn with_read_only(mut self, flag: Arc<AtomicBool>) -> Self {
        self.read_only = flag;
        self
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::Relaxed);
        info!(read_only, "Block check read-only mode changed");
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.load(Ordering::Relaxed)
    }

    /// Fail-open entry point.
    pub async fn execute(&self, name: &str, address: &str, exempt: bool) -> Decision {
        match self.try_execute(name, address, exempt).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(name = %name, address = %address, error = %e, "Block check failed, allowing subject");
                Decision::not_blocked()
            }
        }
    }

    /// Same evaluation as [`execute`](Self::execute) but surfaces store
    /// failures and timeouts to the caller.
    #[instrument(skip(self))]
    pub async fn try_execute(
        &self,
        name: &str,
        address: &str,
        exempt: bool,
    ) -> Result<Decision, DomainError> {
        if exempt {
            return Ok(Decision::not_blocked());
        }
        let Some(subject) = Subject::new(name, address) else {
            debug!("Empty subject name or address, not blocked");
            return Ok(Decision::not_blocked());
        };

        let now = Utc::now();
        let hit = tokio::time::timeout(self.timeout, self.evaluate(&subject, now))
            .await
            .map_err(|_| DomainError::CheckTimeout(self.timeout.as_millis() as u64))??;

        let Some(hit) = hit else {
            return Ok(Decision::not_blocked());
        };

        self.record_match(&subject, &hit, now).await;

        debug!(
            rule_id = hit.rule.id,
            matched_by = hit.matched_by.to_str(),
            creator = %hit.rule.creator,
            "Subject blocked"
        );

        Ok(Decision::blocked_by(
            &hit.rule,
            hit.matched_by,
            hit.matched_value,
        ))
    }

    async fn evaluate(
        &self,
        subject: &Subject,
        now: DateTime<Utc>,
    ) -> Result<Option<RuleHit>, DomainError> {
        let creators = self.cache.creators().await?;

        for creator in creators.iter() {
            let key = subject_key(creator, subject);

            if let Some(cached) = self.cache.get_subject(&key) {
                if cached.rule.is_live_at(now) {
                    return Ok(Some(RuleHit {
                        rule: cached.rule,
                        matched_by: cached.matched_by,
                        matched_value: cached.matched_value,
                    }));
                }
                self.cache.remove_subject(&key);
                self.schedule_purge(&cached.rule);
            }

            let sets = self.cache.get_rules_for(std::slice::from_ref(creator)).await?;
            let Some(set) = sets.first() else {
                continue;
            };

            let outcome = match_subject(set, subject, now);
            for expired in &outcome.expired {
                self.schedule_purge(expired);
            }

            if let Some(hit) = outcome.hit {
                self.cache.put_subject(
                    Arc::from(key),
                    CachedBlock {
                        rule: Arc::clone(&hit.rule),
                        matched_by: hit.matched_by,
                        matched_value: hit.matched_value.clone(),
                    },
                );
                return Ok(Some(hit));
            }
        }

        Ok(None)
    }

    async fn record_match(&self, subject: &Subject, hit: &RuleHit, now: DateTime<Utc>) {
        if self.is_read_only() {
            debug!(rule_id = hit.rule.id, "Read-only mode, match not recorded");
            return;
        }

        let event = MatchEvent {
            id: None,
            rule_id: hit.rule.id,
            subject_name: subject.name.clone(),
            subject_address: subject.address.clone(),
            creator: hit.rule.creator.clone(),
            matched_value: hit.matched_value.clone(),
            timestamp: now,
        };

        match tokio::time::timeout(self.timeout, self.match_repo.record(&event)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                warn!(rule_id = hit.rule.id, error = %e, "Failed to record match event, block still applies");
            }
            Err(_) => {
                warn!(
                    rule_id = hit.rule.id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Recording match event timed out, block still applies"
                );
            }
        }
    }

    /// Fire-and-forget deletion of an expired rule. One task per rule id at a time.
    fn schedule_purge(&self, rule: &Rule) {
        if !with_purging(&self.purging, |set| set.insert(rule.id)) {
            return;
        }

        let rule_repo = Arc::clone(&self.rule_repo);
        let cache = Arc::clone(&self.cache);
        let purging = Arc::clone(&self.purging);
        let rule_id = rule.id;
        let creator = rule.creator.clone();

        tokio::spawn(async move {
            match rule_repo.delete_expired_by_id(rule_id, Utc::now()).await {
                Ok(true) => {
                    cache.invalidate(&creator);
                    info!(rule_id, creator = %creator, "Expired rule removed");
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(rule_id, error = %e, "Failed to remove expired rule");
                }
            }
            with_purging(&purging, |set| set.remove(&rule_id));
        });
    }
}

fn with_purging<R>(purging: &Mutex<FxHashSet<i64>>, f: impl FnOnce(&mut FxHashSet<i64>) -> R) -> R {
    match purging.lock() {
        Ok(mut guard) => f(&mut guard),
        Err(poisoned) => f(&mut poisoned.into_inner()),
    }
}

/// A remembered decision is only valid for the exact subject pair and the
/// creator whose rule produced it.
fn subject_key(creator: &str, subject: &Subject) -> String {
    format!("{}\u{1f}{}\u{1f}{}", creator, subject.name, subject.address)
}
