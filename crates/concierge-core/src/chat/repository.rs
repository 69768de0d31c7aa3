//! ChatRepository trait definition.
//!
//! Provides the session and message operations the chat service needs.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use chrono::{DateTime, Utc};
use concierge_types::chat::{
    ChatMessage, ChatSession, ChatStats, NewMessage, SessionId, SessionStatus,
};
use concierge_types::error::RepositoryError;
use concierge_types::visitor::VisitorId;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in concierge-infra (e.g., `SqliteChatRepository`).
/// No method spans more than one statement; callers get no transactional
/// guarantees across calls.
pub trait ChatRepository: Send + Sync {
    /// Newest session with status `active` for a visitor, if any.
    fn find_active_session(
        &self,
        visitor_id: &VisitorId,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Insert an `active` session with zero messages; the store assigns the id.
    fn create_session(
        &self,
        visitor_id: &VisitorId,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a chat session by id.
    fn get_session(
        &self,
        session_id: SessionId,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List sessions newest first, optionally filtered by status.
    fn list_sessions(
        &self,
        status: Option<SessionStatus>,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Overwrite the message count and updated timestamp.
    ///
    /// Returns `RepositoryError::NotFound` when no such session exists.
    fn update_session_counters(
        &self,
        session_id: SessionId,
        total_messages: u32,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Change a session's status and touch its updated timestamp.
    ///
    /// Returns `RepositoryError::NotFound` when no such session exists.
    fn set_session_status(
        &self,
        session_id: SessionId,
        status: SessionStatus,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a message; the store assigns the id.
    fn insert_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Number of message rows in a session.
    fn count_messages(
        &self,
        session_id: SessionId,
    ) -> impl std::future::Future<Output = Result<u32, RepositoryError>> + Send;

    /// All messages of a session, oldest first.
    fn session_messages(
        &self,
        session_id: SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Up to `limit` most recent messages for a visitor across sessions, newest first.
    fn visitor_history(
        &self,
        visitor_id: &VisitorId,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Aggregate session and message counts.
    fn stats(&self) -> impl std::future::Future<Output = Result<ChatStats, RepositoryError>> + Send;
}
