use super::coarse_clock::{coarse_now_secs, tick};
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use regexblock_application::ports::{
    CacheCompactionOutcome, CachedBlock, RuleCachePort, RuleRepository,
};
use regexblock_application::services::CreatorRuleSet;
use regexblock_domain::DomainError;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

const DEFAULT_SUBJECT_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Validity stamp taken before a load. An entry is served only while both
/// counters still match, so a load racing an invalidation is never visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    global: u64,
    creator: u64,
}

struct SetEntry {
    stamp: Stamp,
    set: Arc<CreatorRuleSet>,
}

struct SubjectEntry {
    stamp: Stamp,
    block: CachedBlock,
    inserted_at: u64,
}

/// The creator list is tagged with the global generation and its own epoch,
/// bumped by every per-creator invalidation. A write may add or remove a
/// creator, so no list loaded before it stays valid.
struct CreatorList {
    generation: u64,
    epoch: u64,
    creators: Arc<[Arc<str>]>,
}

pub struct InMemoryRuleCache {
    repo: Arc<dyn RuleRepository>,
    creators: ArcSwapOption<CreatorList>,
    sets: DashMap<Arc<str>, SetEntry, FxBuildHasher>,
    subjects: DashMap<Arc<str>, SubjectEntry, FxBuildHasher>,
    epochs: DashMap<Arc<str>, u64, FxBuildHasher>,
    generation: AtomicU64,
    list_epoch: AtomicU64,
    subject_ttl_secs: u64,
}

impl InMemoryRuleCache {
    pub fn new(repo: Arc<dyn RuleRepository>) -> Self {
        Self {
            repo,
            creators: ArcSwapOption::empty(),
            sets: DashMap::with_hasher(FxBuildHasher),
            subjects: DashMap::with_hasher(FxBuildHasher),
            epochs: DashMap::with_hasher(FxBuildHasher),
            generation: AtomicU64::new(0),
            list_epoch: AtomicU64::new(0),
            subject_ttl_secs: DEFAULT_SUBJECT_TTL_SECS,
        }
    }

    pub fn with_subject_ttl(mut self, ttl_secs: u64) -> Self {
        self.subject_ttl_secs = ttl_secs;
        self
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn rule_set_count(&self) -> usize {
        self.sets.len()
    }

    fn stamp(&self, creator: &str) -> Stamp {
        Stamp {
            global: self.generation.load(Ordering::SeqCst),
            creator: self.epochs.get(creator).map_or(0, |e| *e),
        }
    }

    #[inline]
    fn is_fresh(&self, inserted_at: u64, now: u64) -> bool {
        now.saturating_sub(inserted_at) < self.subject_ttl_secs
    }

    fn subject_valid(&self, entry: &SubjectEntry, now: u64) -> bool {
        self.is_fresh(entry.inserted_at, now)
            && entry.stamp == self.stamp(&entry.block.rule.creator)
    }

    /// The current, valid rule set of a creator, if one is loaded.
    fn current_set(&self, creator: &str, stamp: Stamp) -> Option<Arc<CreatorRuleSet>> {
        self.sets
            .get(creator)
            .filter(|entry| entry.stamp == stamp)
            .map(|entry| Arc::clone(&entry.set))
    }
}

#[async_trait]
impl RuleCachePort for InMemoryRuleCache {
    async fn creators(&self) -> Result<Arc<[Arc<str>]>, DomainError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let epoch = self.list_epoch.load(Ordering::SeqCst);
        if let Some(list) = self.creators.load_full() {
            if list.generation == generation && list.epoch == epoch {
                return Ok(Arc::clone(&list.creators));
            }
        }

        let creators: Arc<[Arc<str>]> = self.repo.list_distinct_creators().await?.into();
        self.creators.store(Some(Arc::new(CreatorList {
            generation,
            epoch,
            creators: Arc::clone(&creators),
        })));

        debug!(count = creators.len(), "Creator list loaded");
        Ok(creators)
    }

    async fn get_rules_for(
        &self,
        creators: &[Arc<str>],
    ) -> Result<Vec<Arc<CreatorRuleSet>>, DomainError> {
        let mut out = Vec::with_capacity(creators.len());

        for creator in creators {
            let stamp = self.stamp(creator);
            if let Some(set) = self.current_set(creator, stamp) {
                out.push(set);
                continue;
            }

            let rules = self
                .repo
                .list_active_by_creator(creator, Utc::now())
                .await?;
            let set = Arc::new(CreatorRuleSet::compile(Arc::clone(creator), rules));
            self.sets.insert(
                Arc::clone(creator),
                SetEntry {
                    stamp,
                    set: Arc::clone(&set),
                },
            );

            debug!(creator = %creator, rules = set.len(), "Rule set loaded");
            out.push(set);
        }

        Ok(out)
    }

    fn get_subject(&self, key: &str) -> Option<CachedBlock> {
        let now = coarse_now_secs();
        let (block, valid) = {
            let entry = self.subjects.get(key)?;
            (entry.block.clone(), self.subject_valid(&entry, now))
        };

        if valid {
            Some(block)
        } else {
            self.subjects
                .remove_if(key, |_, entry| !self.subject_valid(entry, now));
            None
        }
    }

    fn put_subject(&self, key: Arc<str>, block: CachedBlock) {
        let stamp = self.stamp(&block.rule.creator);
        let belongs = self
            .current_set(&block.rule.creator, stamp)
            .is_some_and(|set| set.contains(&block.rule));
        if !belongs {
            return;
        }

        self.subjects.insert(
            key,
            SubjectEntry {
                stamp,
                block,
                inserted_at: coarse_now_secs(),
            },
        );
    }

    fn remove_subject(&self, key: &str) {
        self.subjects.remove(key);
    }

    fn invalidate(&self, creator: &str) {
        *self.epochs.entry(Arc::from(creator)).or_insert(0) += 1;
        self.list_epoch.fetch_add(1, Ordering::SeqCst);
        self.creators.store(None);
        self.sets.remove(creator);
        self.subjects
            .retain(|_, entry| entry.block.rule.creator.as_ref() != creator);
        debug!(creator = %creator, "Rule cache invalidated for creator");
    }

    fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.creators.store(None);
        self.sets.clear();
        self.subjects.clear();
        debug!("Rule cache fully invalidated");
    }

    fn compact(&self) -> CacheCompactionOutcome {
        tick();
        let now = coarse_now_secs();
        let before = self.subjects.len();
        self.subjects
            .retain(|_, entry| self.subject_valid(entry, now));
        let cache_size = self.subjects.len();

        CacheCompactionOutcome {
            entries_removed: before.saturating_sub(cache_size),
            cache_size,
        }
    }
}
