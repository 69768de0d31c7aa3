//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `concierge-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, integer ids assigned
//! by SQLite.

use chrono::{DateTime, Utc};
use concierge_core::chat::repository::ChatRepository;
use concierge_types::chat::{
    ChatMessage, ChatSession, ChatStats, MessageId, MessageType, NewMessage, SenderRole,
    SessionId, SessionStatus,
};
use concierge_types::error::RepositoryError;
use concierge_types::visitor::VisitorId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::time::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatSessionRow {
    id: i64,
    visitor_id: String,
    status: String,
    total_messages: i64,
    started_at: String,
    created_at: String,
    updated_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            visitor_id: row.try_get("visitor_id")?,
            status: row.try_get("status")?,
            total_messages: row.try_get("total_messages")?,
            started_at: row.try_get("started_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let status: SessionStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatSession {
            id: SessionId(self.id),
            visitor_id: VisitorId(self.visitor_id),
            status,
            total_messages: self.total_messages.max(0) as u32,
            started_at: parse_datetime(&self.started_at)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

struct ChatMessageRow {
    id: i64,
    session_id: i64,
    visitor_id: String,
    message_type: String,
    sender_type: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            visitor_id: row.try_get("visitor_id")?,
            message_type: row.try_get("message_type")?,
            sender_type: row.try_get("sender_type")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let message_type: MessageType = self
            .message_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let sender: SenderRole = self
            .sender_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            id: MessageId(self.id),
            session_id: SessionId(self.session_id),
            visitor_id: VisitorId(self.visitor_id),
            message_type,
            sender,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn sessions_from_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<ChatSession>, RepositoryError> {
    let mut sessions = Vec::with_capacity(rows.len());
    for row in rows {
        let session_row = ChatSessionRow::from_row(row).map_err(query_err)?;
        sessions.push(session_row.into_session()?);
    }
    Ok(sessions)
}

fn messages_from_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<ChatMessage>, RepositoryError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        let msg_row = ChatMessageRow::from_row(row).map_err(query_err)?;
        messages.push(msg_row.into_message()?);
    }
    Ok(messages)
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn find_active_session(
        &self,
        visitor_id: &VisitorId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM chat_sessions
               WHERE visitor_id = ? AND status = 'active'
               ORDER BY created_at DESC, id DESC
               LIMIT 1"#,
        )
        .bind(visitor_id.as_str())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row).map_err(query_err)?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn create_session(
        &self,
        visitor_id: &VisitorId,
        now: DateTime<Utc>,
    ) -> Result<ChatSession, RepositoryError> {
        let ts = format_datetime(&now);
        let result = sqlx::query(
            r#"INSERT INTO chat_sessions (visitor_id, status, total_messages, started_at, created_at, updated_at)
               VALUES (?, ?, 0, ?, ?, ?)"#,
        )
        .bind(visitor_id.as_str())
        .bind(SessionStatus::Active.to_string())
        .bind(&ts)
        .bind(&ts)
        .bind(&ts)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(ChatSession {
            id: SessionId(result.last_insert_rowid()),
            visitor_id: visitor_id.clone(),
            status: SessionStatus::Active,
            total_messages: 0,
            started_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row).map_err(query_err)?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn list_sessions(
        &self,
        status: Option<SessionStatus>,
        limit: i64,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(
                    "SELECT * FROM chat_sessions WHERE status = ? ORDER BY created_at DESC, id DESC LIMIT ?",
                )
                .bind(status.to_string())
                .bind(limit)
                .fetch_all(&self.pool.reader)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM chat_sessions ORDER BY created_at DESC, id DESC LIMIT ?")
                    .bind(limit)
                    .fetch_all(&self.pool.reader)
                    .await
            }
        }
        .map_err(query_err)?;

        sessions_from_rows(&rows)
    }

    async fn update_session_counters(
        &self,
        session_id: SessionId,
        total_messages: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE chat_sessions SET total_messages = ?, updated_at = ? WHERE id = ?")
                .bind(total_messages as i64)
                .bind(format_datetime(&updated_at))
                .bind(session_id.0)
                .execute(&self.pool.writer)
                .await
                .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_session_status(
        &self,
        session_id: SessionId,
        status: SessionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chat_sessions SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(format_datetime(&updated_at))
            .bind(session_id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<ChatMessage, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO chat_messages (session_id, visitor_id, message_type, sender_type, content, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.session_id.0)
        .bind(message.visitor_id.as_str())
        .bind(message.message_type.to_string())
        .bind(message.sender.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(ChatMessage {
            id: MessageId(result.last_insert_rowid()),
            session_id: message.session_id,
            visitor_id: message.visitor_id.clone(),
            message_type: message.message_type,
            sender: message.sender,
            content: message.content.clone(),
            created_at: message.created_at,
        })
    }

    async fn count_messages(&self, session_id: SessionId) -> Result<u32, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_messages WHERE session_id = ?")
            .bind(session_id.0)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_err)?;

        let count: i64 = row.try_get("cnt").map_err(query_err)?;

        Ok(count as u32)
    }

    async fn session_messages(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id.0)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        messages_from_rows(&rows)
    }

    async fn visitor_history(
        &self,
        visitor_id: &VisitorId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE visitor_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(visitor_id.as_str())
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        messages_from_rows(&rows)
    }

    async fn stats(&self) -> Result<ChatStats, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT
                (SELECT COUNT(*) FROM chat_sessions) as total_sessions,
                (SELECT COUNT(*) FROM chat_sessions WHERE status = 'active') as active_sessions,
                (SELECT COUNT(*) FROM chat_messages) as total_messages"#,
        )
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let total_sessions: i64 = row.try_get("total_sessions").map_err(query_err)?;
        let active_sessions: i64 = row.try_get("active_sessions").map_err(query_err)?;
        let total_messages: i64 = row.try_get("total_messages").map_err(query_err)?;

        Ok(ChatStats {
            total_sessions: total_sessions as u64,
            active_sessions: active_sessions as u64,
            total_messages: total_messages as u64,
        })
    }
}
