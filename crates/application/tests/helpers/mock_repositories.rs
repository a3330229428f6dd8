#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use regexblock_application::ports::{
    CacheCompactionOutcome, CachedBlock, MatchEventRepository, RuleCachePort, RuleRepository,
};
use regexblock_application::services::CreatorRuleSet;
use regexblock_domain::{
    AdminContext, DomainError, Expiry, MatchEvent, NewRule, Pagination, Rule, RuleKind,
    RuleListFilter,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub fn admin(name: &str) -> AdminContext {
    AdminContext::new(name).unwrap()
}

pub fn stored_rule(id: i64, pattern: &str, kind: RuleKind, creator: &str, expiry: Expiry) -> Rule {
    Rule {
        id,
        pattern: Arc::from(pattern),
        kind,
        creator: Arc::from(creator),
        created_at: Utc::now() - TimeDelta::days(1) + TimeDelta::seconds(id),
        expiry,
        block_account_creation: false,
        reason: None,
    }
}

pub fn expired() -> Expiry {
    Expiry::At(Utc::now() - TimeDelta::hours(1))
}

#[derive(Clone, Default)]
pub struct MockRuleRepository {
    rules: Arc<RwLock<Vec<Rule>>>,
    next_id: Arc<AtomicI64>,
    should_fail: Arc<AtomicBool>,
    delay: Arc<RwLock<Option<Duration>>>,
    loads: Arc<AtomicUsize>,
}

impl MockRuleRepository {
    pub fn new() -> Self {
        Self {
            next_id: Arc::new(AtomicI64::new(1)),
            ..Default::default()
        }
    }

    /// Seeds a rule as-is, bypassing validation (expired rules included).
    pub fn insert(&self, rule: Rule) {
        self.next_id.fetch_max(rule.id + 1, Ordering::SeqCst);
        self.rules.write().unwrap().push(rule);
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.rules.read().unwrap().iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.read().unwrap().len()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().unwrap() = delay;
    }

    /// Number of `list_active_by_creator` calls served.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    async fn gate(&self) -> Result<(), DomainError> {
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("mock store down".to_string()));
        }
        Ok(())
    }

    fn matches_filter(rule: &Rule, filter: &RuleListFilter) -> bool {
        if let Some(subject) = &filter.subject {
            return rule.pattern.contains(subject.as_ref());
        }
        if let Some(creator) = &filter.creator {
            return rule.creator == *creator;
        }
        true
    }
}

#[async_trait]
impl RuleRepository for MockRuleRepository {
    async fn create(&self, rule: NewRule) -> Result<Rule, DomainError> {
        self.gate().await?;
        let now = Utc::now();
        let mut rules = self.rules.write().unwrap();
        if let Some(pos) = rules.iter().position(|r| r.pattern.as_ref() == rule.pattern) {
            if rules[pos].is_live_at(now) {
                return Err(DomainError::RuleAlreadyExists(rule.pattern));
            }
            rules.remove(pos);
        }
        let stored = Rule {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            pattern: Arc::from(rule.pattern),
            kind: rule.kind,
            creator: rule.creator,
            created_at: now,
            expiry: rule.expiry,
            block_account_creation: rule.block_account_creation,
            reason: rule.reason.map(Arc::from),
        };
        rules.push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Rule>, DomainError> {
        self.gate().await?;
        Ok(self.rules.read().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<Option<Rule>, DomainError> {
        self.gate().await?;
        let mut rules = self.rules.write().unwrap();
        Ok(rules
            .iter()
            .position(|r| r.pattern.as_ref() == pattern)
            .map(|pos| rules.remove(pos)))
    }

    async fn delete_expired_by_id(&self, id: i64, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.gate().await?;
        let mut rules = self.rules.write().unwrap();
        match rules.iter().position(|r| r.id == id && !r.is_live_at(now)) {
            Some(pos) => {
                rules.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Rule>, DomainError> {
        self.gate().await?;
        let mut rules = self.rules.write().unwrap();
        let (gone, kept): (Vec<Rule>, Vec<Rule>) =
            rules.drain(..).partition(|r| !r.is_live_at(now));
        *rules = kept;
        Ok(gone)
    }

    async fn list_active_by_creator(
        &self,
        creator: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Rule>, DomainError> {
        self.gate().await?;
        self.loads.fetch_add(1, Ordering::SeqCst);
        let mut out: Vec<Rule> = self
            .rules
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.creator.as_ref() == creator && r.is_live_at(now))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn list_distinct_creators(&self) -> Result<Vec<Arc<str>>, DomainError> {
        self.gate().await?;
        let mut creators: Vec<Arc<str>> = self
            .rules
            .read()
            .unwrap()
            .iter()
            .map(|r| r.creator.clone())
            .collect();
        creators.sort();
        creators.dedup();
        Ok(creators)
    }

    async fn list(&self, filter: &RuleListFilter, page: Pagination) -> Result<Vec<Rule>, DomainError> {
        self.gate().await?;
        let mut out: Vec<Rule> = self
            .rules
            .read()
            .unwrap()
            .iter()
            .filter(|r| Self::matches_filter(r, filter))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(out
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &RuleListFilter) -> Result<u64, DomainError> {
        self.gate().await?;
        Ok(self
            .rules
            .read()
            .unwrap()
            .iter()
            .filter(|r| Self::matches_filter(r, filter))
            .count() as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockMatchEventRepository {
    events: Arc<RwLock<Vec<MatchEvent>>>,
    should_fail: Arc<AtomicBool>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockMatchEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MatchEvent> {
        self.events.read().unwrap().clone()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().unwrap() = delay;
    }
}

#[async_trait]
impl MatchEventRepository for MockMatchEventRepository {
    async fn record(&self, event: &MatchEvent) -> Result<i64, DomainError> {
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("mock audit down".to_string()));
        }
        let mut events = self.events.write().unwrap();
        let id = events.len() as i64 + 1;
        let mut stored = event.clone();
        stored.id = Some(id);
        events.push(stored);
        Ok(id)
    }

    async fn list_by_rule(&self, rule_id: i64, page: Pagination) -> Result<Vec<MatchEvent>, DomainError> {
        let mut out: Vec<MatchEvent> = self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.rule_id == rule_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(out
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_by_rule(&self, rule_id: i64) -> Result<u64, DomainError> {
        Ok(self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.rule_id == rule_id)
            .count() as u64)
    }
}

/// Plain read-through cache over a rule repository, without the generation
/// bookkeeping of the production adapter.
#[derive(Clone)]
pub struct MockRuleCache {
    repo: Arc<dyn RuleRepository>,
    creators: Arc<RwLock<Option<Arc<[Arc<str>]>>>>,
    sets: Arc<RwLock<HashMap<Arc<str>, Arc<CreatorRuleSet>>>>,
    subjects: Arc<RwLock<HashMap<Arc<str>, CachedBlock>>>,
    invalidations: Arc<AtomicUsize>,
}

impl MockRuleCache {
    pub fn new(repo: Arc<dyn RuleRepository>) -> Self {
        Self {
            repo,
            creators: Arc::new(RwLock::new(None)),
            sets: Arc::new(RwLock::new(HashMap::new())),
            subjects: Arc::new(RwLock::new(HashMap::new())),
            invalidations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn subject_entries(&self) -> usize {
        self.subjects.read().unwrap().len()
    }

    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleCachePort for MockRuleCache {
    async fn creators(&self) -> Result<Arc<[Arc<str>]>, DomainError> {
        let cached = self.creators.read().unwrap().clone();
        if let Some(creators) = cached {
            return Ok(creators);
        }
        let loaded: Arc<[Arc<str>]> = self.repo.list_distinct_creators().await?.into();
        *self.creators.write().unwrap() = Some(loaded.clone());
        Ok(loaded)
    }

    async fn get_rules_for(
        &self,
        creators: &[Arc<str>],
    ) -> Result<Vec<Arc<CreatorRuleSet>>, DomainError> {
        let mut out = Vec::with_capacity(creators.len());
        for creator in creators {
            let cached = self.sets.read().unwrap().get(creator).cloned();
            let set = match cached {
                Some(set) => set,
                None => {
                    let rules = self
                        .repo
                        .list_active_by_creator(creator, Utc::now())
                        .await?;
                    let set = Arc::new(CreatorRuleSet::compile(creator.clone(), rules));
                    self.sets
                        .write()
                        .unwrap()
                        .insert(creator.clone(), set.clone());
                    set
                }
            };
            out.push(set);
        }
        Ok(out)
    }

    fn get_subject(&self, key: &str) -> Option<CachedBlock> {
        self.subjects.read().unwrap().get(key).cloned()
    }

    fn put_subject(&self, key: Arc<str>, block: CachedBlock) {
        self.subjects.write().unwrap().insert(key, block);
    }

    fn remove_subject(&self, key: &str) {
        self.subjects.write().unwrap().remove(key);
    }

    fn invalidate(&self, creator: &str) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        *self.creators.write().unwrap() = None;
        self.sets.write().unwrap().remove(creator);
        self.subjects.write().unwrap().clear();
    }

    fn invalidate_all(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        *self.creators.write().unwrap() = None;
        self.sets.write().unwrap().clear();
        self.subjects.write().unwrap().clear();
    }

    fn compact(&self) -> CacheCompactionOutcome {
        CacheCompactionOutcome {
            entries_removed: 0,
            cache_size: self.subjects.read().unwrap().len(),
        }
    }
}
