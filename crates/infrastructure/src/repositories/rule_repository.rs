use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regexblock_application::ports::RuleRepository;
use regexblock_domain::expiry::{format_db_timestamp, parse_db_timestamp};
use regexblock_domain::{
    DomainError, Expiry, NewRule, Pagination, Rule, RuleKind, RuleListFilter,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument, warn};

type RuleRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    Option<String>,
);

const RULE_COLUMNS: &str =
    "id, pattern, kind, creator, created_at, expiry, block_account_creation, reason";

pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_rule(row: RuleRow) -> Rule {
        let (id, pattern, kind, creator, created_at, expiry, block_account_creation, reason) = row;
        let created_at = parse_db_timestamp(&created_at).unwrap_or_default();
        let expiry = Expiry::from_db_string(&expiry).unwrap_or_else(|| {
            warn!(rule_id = id, expiry = %expiry, "Unreadable expiry, treating rule as expired");
            Expiry::At(created_at)
        });
        Rule {
            id,
            pattern: Arc::from(pattern.as_str()),
            kind: kind.parse::<RuleKind>().unwrap_or(RuleKind::Regex),
            creator: Arc::from(creator.as_str()),
            created_at,
            expiry,
            block_account_creation: block_account_creation != 0,
            reason: reason.map(|s| Arc::from(s.as_str())),
        }
    }

    fn store_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
        move |e| {
            error!(error = %e, "{}", context);
            DomainError::StoreUnavailable(e.to_string())
        }
    }

    fn is_unique_violation(e: &sqlx::Error) -> bool {
        match e {
            sqlx::Error::Database(db) => db.is_unique_violation(),
            _ => false,
        }
    }

    /// Escapes LIKE wildcards so the subject filter is a plain substring match.
    fn like_pattern(subject: &str) -> String {
        let mut out = String::with_capacity(subject.len() + 2);
        out.push('%');
        for c in subject.chars() {
            if matches!(c, '%' | '_' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('%');
        out
    }

    fn where_clause(filter: &RuleListFilter) -> (&'static str, Option<String>) {
        if let Some(subject) = &filter.subject {
            (
                "WHERE pattern LIKE ? ESCAPE '\\'",
                Some(Self::like_pattern(subject)),
            )
        } else if let Some(creator) = &filter.creator {
            ("WHERE creator = ?", Some(creator.to_string()))
        } else {
            ("", None)
        }
    }
}

#[async_trait]
impl RuleRepository for SqliteRuleRepository {
    #[instrument(skip(self, rule), fields(pattern = %rule.pattern))]
    async fn create(&self, rule: NewRule) -> Result<Rule, DomainError> {
        let now = Utc::now();
        let now_str = format_db_timestamp(now);

        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(Self::store_error("Failed to begin rule transaction"))?;

        let existing = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, expiry FROM rules WHERE pattern = ?",
        )
        .bind(&rule.pattern)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Self::store_error("Failed to look up existing rule"))?;

        if let Some((existing_id, expiry)) = existing {
            let live = Expiry::from_db_string(&expiry).is_some_and(|e| e.is_live_at(now));
            if live {
                return Err(DomainError::RuleAlreadyExists(rule.pattern));
            }
            sqlx::query("DELETE FROM rules WHERE id = ?")
                .bind(existing_id)
                .execute(&mut *tx)
                .await
                .map_err(Self::store_error("Failed to replace expired rule"))?;
        }

        let result = sqlx::query(
            "INSERT INTO rules (pattern, kind, creator, created_at, expiry, block_account_creation, reason)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&rule.pattern)
        .bind(rule.kind.to_str())
        .bind(rule.creator.as_ref())
        .bind(&now_str)
        .bind(rule.expiry.to_db_string())
        .bind(if rule.block_account_creation { 1i64 } else { 0i64 })
        .bind(&rule.reason)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if Self::is_unique_violation(&e) {
                DomainError::RuleAlreadyExists(rule.pattern.clone())
            } else {
                error!(error = %e, "Failed to insert rule");
                DomainError::StoreUnavailable(e.to_string())
            }
        })?;

        tx.commit()
            .await
            .map_err(Self::store_error("Failed to commit rule"))?;

        let id = result.last_insert_rowid();

        self.get_by_id(id).await?.ok_or_else(|| {
            DomainError::StoreUnavailable("Failed to fetch created rule".to_string())
        })
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Rule>, DomainError> {
        let row = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {} FROM rules WHERE id = ?",
            RULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::store_error("Failed to query rule by id"))?;

        Ok(row.map(Self::row_to_rule))
    }

    #[instrument(skip(self))]
    async fn delete_by_pattern(&self, pattern: &str) -> Result<Option<Rule>, DomainError> {
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(Self::store_error("Failed to begin delete transaction"))?;

        let row = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {} FROM rules WHERE pattern = ?",
            RULE_COLUMNS
        ))
        .bind(pattern)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Self::store_error("Failed to query rule by pattern"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let rule = Self::row_to_rule(row);

        sqlx::query("DELETE FROM rules WHERE id = ?")
            .bind(rule.id)
            .execute(&mut *tx)
            .await
            .map_err(Self::store_error("Failed to delete rule"))?;

        tx.commit()
            .await
            .map_err(Self::store_error("Failed to commit rule deletion"))?;

        Ok(Some(rule))
    }

    #[instrument(skip(self))]
    async fn delete_expired_by_id(&self, id: i64, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM rules WHERE id = ? AND expiry <= ?")
            .bind(id)
            .bind(format_db_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(Self::store_error("Failed to delete expired rule"))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Rule>, DomainError> {
        let now_str = format_db_timestamp(now);
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(Self::store_error("Failed to begin purge transaction"))?;

        let rows = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {} FROM rules WHERE expiry <= ?",
            RULE_COLUMNS
        ))
        .bind(&now_str)
        .fetch_all(&mut *tx)
        .await
        .map_err(Self::store_error("Failed to query expired rules"))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query("DELETE FROM rules WHERE expiry <= ?")
            .bind(&now_str)
            .execute(&mut *tx)
            .await
            .map_err(Self::store_error("Failed to purge expired rules"))?;

        tx.commit()
            .await
            .map_err(Self::store_error("Failed to commit purge"))?;

        Ok(rows.into_iter().map(Self::row_to_rule).collect())
    }

    #[instrument(skip(self))]
    async fn list_active_by_creator(
        &self,
        creator: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Rule>, DomainError> {
        let rows = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {} FROM rules WHERE creator = ? AND expiry > ?
             ORDER BY created_at DESC, id DESC",
            RULE_COLUMNS
        ))
        .bind(creator)
        .bind(format_db_timestamp(now))
        .fetch_all(&self.pool)
        .await
        .map_err(Self::store_error("Failed to query active rules"))?;

        Ok(rows.into_iter().map(Self::row_to_rule).collect())
    }

    #[instrument(skip(self))]
    async fn list_distinct_creators(&self) -> Result<Vec<Arc<str>>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT DISTINCT creator FROM rules ORDER BY creator ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::store_error("Failed to query rule creators"))?;

        Ok(rows
            .into_iter()
            .map(|(creator,)| Arc::from(creator.as_str()))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &RuleListFilter,
        page: Pagination,
    ) -> Result<Vec<Rule>, DomainError> {
        let (clause, value) = Self::where_clause(filter);
        let sql = format!(
            "SELECT {} FROM rules {} ORDER BY id DESC LIMIT ? OFFSET ?",
            RULE_COLUMNS, clause
        );

        let mut query = sqlx::query_as::<_, RuleRow>(&sql);
        if let Some(value) = value {
            query = query.bind(value);
        }
        let rows = query
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(Self::store_error("Failed to list rules"))?;

        Ok(rows.into_iter().map(Self::row_to_rule).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &RuleListFilter) -> Result<u64, DomainError> {
        let (clause, value) = Self::where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM rules {}", clause);

        let mut query = sqlx::query_as::<_, (i64,)>(&sql);
        if let Some(value) = value {
            query = query.bind(value);
        }
        let (count,) = query
            .fetch_one(&self.pool)
            .await
            .map_err(Self::store_error("Failed to count rules"))?;

        Ok(count as u64)
    }
}
