#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use regexblock_application::ports::{
    CacheCompactionOutcome, CachedBlock, RuleCachePort, RuleRepository,
};
use regexblock_application::services::CreatorRuleSet;
use regexblock_domain::{
    DomainError, Expiry, NewRule, Pagination, Rule, RuleKind, RuleListFilter,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn rule_expiring_at(id: i64, pattern: &str, expiry: Expiry) -> Rule {
    Rule {
        id,
        pattern: Arc::from(pattern),
        kind: RuleKind::Regex,
        creator: Arc::from("admin"),
        created_at: Utc::now() - TimeDelta::days(1),
        expiry,
        block_account_creation: false,
        reason: None,
    }
}

/// Only the purge path is backed by state; the rest answers empty.
#[derive(Default)]
pub struct MockRuleRepository {
    rules: Mutex<Vec<Rule>>,
    purge_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, rule: Rule) {
        self.rules.lock().unwrap().push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.lock().unwrap().len()
    }

    pub fn purge_call_count(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RuleRepository for MockRuleRepository {
    async fn create(&self, rule: NewRule) -> Result<Rule, DomainError> {
        Err(DomainError::RuleAlreadyExists(rule.pattern))
    }

    async fn get_by_id(&self, _id: i64) -> Result<Option<Rule>, DomainError> {
        Ok(None)
    }

    async fn delete_by_pattern(&self, _pattern: &str) -> Result<Option<Rule>, DomainError> {
        Ok(None)
    }

    async fn delete_expired_by_id(
        &self,
        _id: i64,
        _now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Rule>, DomainError> {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("mock store down".to_string()));
        }
        let mut rules = self.rules.lock().unwrap();
        let (expired, live): (Vec<Rule>, Vec<Rule>) =
            rules.drain(..).partition(|r| !r.is_live_at(now));
        *rules = live;
        Ok(expired)
    }

    async fn list_active_by_creator(
        &self,
        _creator: &str,
        _now: DateTime<Utc>,
    ) -> Result<Vec<Rule>, DomainError> {
        Ok(Vec::new())
    }

    async fn list_distinct_creators(&self) -> Result<Vec<Arc<str>>, DomainError> {
        Ok(Vec::new())
    }

    async fn list(
        &self,
        _filter: &RuleListFilter,
        _page: Pagination,
    ) -> Result<Vec<Rule>, DomainError> {
        Ok(Vec::new())
    }

    async fn count(&self, _filter: &RuleListFilter) -> Result<u64, DomainError> {
        Ok(0)
    }
}

#[derive(Default)]
pub struct MockRuleCache {
    compactions: AtomicUsize,
    invalidate_all_calls: AtomicUsize,
}

impl MockRuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compaction_call_count(&self) -> usize {
        self.compactions.load(Ordering::SeqCst)
    }

    pub fn invalidate_all_count(&self) -> usize {
        self.invalidate_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleCachePort for MockRuleCache {
    async fn creators(&self) -> Result<Arc<[Arc<str>]>, DomainError> {
        Ok(Arc::from(Vec::new()))
    }

    async fn get_rules_for(
        &self,
        creators: &[Arc<str>],
    ) -> Result<Vec<Arc<CreatorRuleSet>>, DomainError> {
        Ok(creators
            .iter()
            .map(|c| Arc::new(CreatorRuleSet::empty(Arc::clone(c))))
            .collect())
    }

    fn get_subject(&self, _key: &str) -> Option<CachedBlock> {
        None
    }

    fn put_subject(&self, _key: Arc<str>, _block: CachedBlock) {}

    fn remove_subject(&self, _key: &str) {}

    fn invalidate(&self, _creator: &str) {}

    fn invalidate_all(&self) {
        self.invalidate_all_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn compact(&self) -> CacheCompactionOutcome {
        self.compactions.fetch_add(1, Ordering::SeqCst);
        CacheCompactionOutcome {
            entries_removed: 1,
            cache_size: 0,
        }
    }
}
