//! SQLite FAQ repository implementation.

use chrono::Utc;
use concierge_core::faq::repository::FaqRepository;
use concierge_types::error::RepositoryError;
use concierge_types::faq::{FaqEntry, NewFaqEntry};
use sqlx::Row;

use super::pool::DatabasePool;
use super::time::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `FaqRepository`.
pub struct SqliteFaqRepository {
    pool: DatabasePool,
}

impl SqliteFaqRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct FaqRow {
    id: i64,
    question: String,
    answer: String,
    category: Option<String>,
    priority: i64,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

impl FaqRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            question: row.try_get("question")?,
            answer: row.try_get("answer")?,
            category: row.try_get("category")?,
            priority: row.try_get("priority")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_entry(self) -> Result<FaqEntry, RepositoryError> {
        Ok(FaqEntry {
            id: self.id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            priority: self.priority as i32,
            is_active: self.is_active,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

impl FaqRepository for SqliteFaqRepository {
    async fn list_active(&self, category: Option<&str>) -> Result<Vec<FaqEntry>, RepositoryError> {
        let rows = match category {
            Some(category) => {
                sqlx::query(
                    "SELECT * FROM faq_entries WHERE is_active = 1 AND category = ? ORDER BY priority ASC, id ASC",
                )
                .bind(category)
                .fetch_all(&self.pool.reader)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM faq_entries WHERE is_active = 1 ORDER BY priority ASC, id ASC")
                    .fetch_all(&self.pool.reader)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let faq_row = FaqRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            entries.push(faq_row.into_entry()?);
        }

        Ok(entries)
    }

    async fn create(&self, entry: &NewFaqEntry) -> Result<FaqEntry, RepositoryError> {
        let now = Utc::now();
        let ts = format_datetime(&now);
        let result = sqlx::query(
            r#"INSERT INTO faq_entries (question, answer, category, priority, is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, 1, ?, ?)"#,
        )
        .bind(&entry.question)
        .bind(&entry.answer)
        .bind(&entry.category)
        .bind(entry.priority as i64)
        .bind(&ts)
        .bind(&ts)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(FaqEntry {
            id: result.last_insert_rowid(),
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            category: entry.category.clone(),
            priority: entry.priority,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE faq_entries SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(format_datetime(&Utc::now()))
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
