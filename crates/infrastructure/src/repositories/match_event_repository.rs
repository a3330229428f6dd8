use async_trait::async_trait;
use regexblock_application::ports::MatchEventRepository;
use regexblock_domain::expiry::{format_db_timestamp, parse_db_timestamp};
use regexblock_domain::{DomainError, MatchEvent, Pagination};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type MatchEventRow = (i64, i64, String, String, String, String, String);

pub struct SqliteMatchEventRepository {
    pool: SqlitePool,
}

impl SqliteMatchEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: MatchEventRow) -> MatchEvent {
        let (id, rule_id, subject_name, subject_address, creator, timestamp, matched_value) = row;
        MatchEvent {
            id: Some(id),
            rule_id,
            subject_name: Arc::from(subject_name.as_str()),
            subject_address: Arc::from(subject_address.as_str()),
            creator: Arc::from(creator.as_str()),
            matched_value: Arc::from(matched_value.as_str()),
            timestamp: parse_db_timestamp(&timestamp).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl MatchEventRepository for SqliteMatchEventRepository {
    #[instrument(skip(self, event), fields(rule_id = event.rule_id))]
    async fn record(&self, event: &MatchEvent) -> Result<i64, DomainError> {
        let result = sqlx::query(
            "INSERT INTO match_events (rule_id, subject_name, subject_address, creator, timestamp, matched_value)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(event.rule_id)
        .bind(event.subject_name.as_ref())
        .bind(event.subject_address.as_ref())
        .bind(event.creator.as_ref())
        .bind(format_db_timestamp(event.timestamp))
        .bind(event.matched_value.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to record match event");
            DomainError::StoreUnavailable(e.to_string())
        })?;

        Ok(result.last_insert_rowid())
    }

    #[instrument(skip(self))]
    async fn list_by_rule(
        &self,
        rule_id: i64,
        page: Pagination,
    ) -> Result<Vec<MatchEvent>, DomainError> {
        let rows = sqlx::query_as::<_, MatchEventRow>(
            "SELECT id, rule_id, subject_name, subject_address, creator, timestamp, matched_value
             FROM match_events WHERE rule_id = ?
             ORDER BY timestamp DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(rule_id)
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query match events");
            DomainError::StoreUnavailable(e.to_string())
        })?;

        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_rule(&self, rule_id: i64) -> Result<u64, DomainError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM match_events WHERE rule_id = ?",
        )
        .bind(rule_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count match events");
            DomainError::StoreUnavailable(e.to_string())
        })?;

        Ok(count as u64)
    }
}
