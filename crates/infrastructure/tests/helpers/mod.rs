#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regexblock_application::ports::RuleRepository;
use regexblock_domain::{
    AdminContext, DomainError, Expiry, NewRule, Pagination, Rule, RuleKind, RuleListFilter,
};
use regexblock_domain::config::DatabaseConfig;
use regexblock_infrastructure::database::{create_pool, MIGRATOR};
use regexblock_infrastructure::repositories::SqliteRuleRepository;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();

    pool
}

/// File-backed pool, so several connections contend on the same database.
pub struct FileDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl FileDb {
    pub async fn new(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "regexblock-{}-{}-{}.db",
            name,
            std::process::id(),
            nanos
        ));
        let config = DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            max_connections: 4,
            busy_timeout_secs: 5,
        };
        let pool = create_pool(&config).await.unwrap();
        Self { pool, path }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn new_rule(pattern: &str, kind: RuleKind, creator: &str) -> NewRule {
    let ctx = AdminContext::new(creator).unwrap();
    NewRule::new(pattern, kind, ctx.principal().clone(), Expiry::Never, false, None).unwrap()
}

/// Writes a rule row directly, bypassing the repository's conflict handling.
pub async fn insert_raw_rule(
    pool: &SqlitePool,
    pattern: &str,
    kind: &str,
    creator: &str,
    created_at: &str,
    expiry: &str,
) -> i64 {
    sqlx::query(
        "INSERT INTO rules (pattern, kind, creator, created_at, expiry, block_account_creation, reason)
         VALUES (?, ?, ?, ?, ?, 0, NULL)",
    )
    .bind(pattern)
    .bind(kind)
    .bind(creator)
    .bind(created_at)
    .bind(expiry)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

/// Delegates to the SQLite repository, counting creator loads and optionally
/// stalling them.
pub struct InstrumentedRuleRepository {
    inner: SqliteRuleRepository,
    loads: AtomicUsize,
    load_delay_ms: AtomicU64,
    creators_delay_ms: AtomicU64,
}

impl InstrumentedRuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: SqliteRuleRepository::new(pool),
            loads: AtomicUsize::new(0),
            load_delay_ms: AtomicU64::new(0),
            creators_delay_ms: AtomicU64::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn set_load_delay(&self, delay: Duration) {
        self.load_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_creators_delay(&self, delay: Duration) {
        self.creators_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

#[async_trait]
impl RuleRepository for InstrumentedRuleRepository {
    async fn create(&self, rule: NewRule) -> Result<Rule, DomainError> {
        self.inner.create(rule).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Rule>, DomainError> {
        self.inner.get_by_id(id).await
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<Option<Rule>, DomainError> {
        self.inner.delete_by_pattern(pattern).await
    }

    async fn delete_expired_by_id(&self, id: i64, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.inner.delete_expired_by_id(id, now).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Rule>, DomainError> {
        self.inner.purge_expired(now).await
    }

    async fn list_active_by_creator(
        &self,
        creator: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Rule>, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let rules = self.inner.list_active_by_creator(creator, now).await;
        let delay = self.load_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        rules
    }

    async fn list_distinct_creators(&self) -> Result<Vec<Arc<str>>, DomainError> {
        let creators = self.inner.list_distinct_creators().await;
        let delay = self.creators_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        creators
    }

    async fn list(&self, filter: &RuleListFilter, page: Pagination) -> Result<Vec<Rule>, DomainError> {
        self.inner.list(filter, page).await
    }

    async fn count(&self, filter: &RuleListFilter) -> Result<u64, DomainError> {
        self.inner.count(filter).await
    }
}
