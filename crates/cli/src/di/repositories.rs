use regexblock_domain::config::BlockingConfig;
use regexblock_infrastructure::cache::InMemoryRuleCache;
use regexblock_infrastructure::repositories::{SqliteMatchEventRepository, SqliteRuleRepository};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub rules: Arc<SqliteRuleRepository>,
    pub match_events: Arc<SqliteMatchEventRepository>,
    pub cache: Arc<InMemoryRuleCache>,
}

impl Repositories {
    pub fn new(pool: SqlitePool, blocking: &BlockingConfig) -> Self {
        let rules = Arc::new(SqliteRuleRepository::new(pool.clone()));
        let cache = Arc::new(
            InMemoryRuleCache::new(rules.clone())
                .with_subject_ttl(blocking.subject_cache_ttl_secs),
        );
        Self {
            rules,
            match_events: Arc::new(SqliteMatchEventRepository::new(pool)),
            cache,
        }
    }
}
