//! In-memory `ChatRepository` for service tests.
//!
//! Counts writes and can be told to fail message inserts for one sender.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use concierge_types::chat::{
    ChatMessage, ChatSession, ChatStats, MessageId, NewMessage, SenderRole, SessionId,
    SessionStatus,
};
use concierge_types::error::RepositoryError;
use concierge_types::visitor::VisitorId;

use super::repository::ChatRepository;

#[derive(Default)]
struct State {
    sessions: Vec<ChatSession>,
    messages: Vec<ChatMessage>,
    writes: usize,
    fail_insert_for: Option<SenderRole>,
}

#[derive(Default)]
pub(crate) struct MemoryChatRepository {
    state: Mutex<State>,
}

impl MemoryChatRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every `insert_message` with this sender fail.
    pub(crate) fn fail_inserts_for(&self, sender: SenderRole) {
        self.state.lock().unwrap().fail_insert_for = Some(sender);
    }

    pub(crate) fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub(crate) fn sessions(&self) -> Vec<ChatSession> {
        self.state.lock().unwrap().sessions.clone()
    }

    pub(crate) fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().unwrap().messages.clone()
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn find_active_session(
        &self,
        visitor_id: &VisitorId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .filter(|s| &s.visitor_id == visitor_id && s.status == SessionStatus::Active)
            .max_by_key(|s| (s.created_at, s.id.0))
            .cloned())
    }

    async fn create_session(
        &self,
        visitor_id: &VisitorId,
        now: DateTime<Utc>,
    ) -> Result<ChatSession, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let session = ChatSession {
            id: SessionId(state.sessions.len() as i64 + 1),
            visitor_id: visitor_id.clone(),
            status: SessionStatus::Active,
            total_messages: 0,
            started_at: now,
            created_at: now,
            updated_at: now,
        };
        state.sessions.push(session.clone());
        Ok(session)
    }

    async fn get_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.iter().find(|s| s.id == session_id).cloned())
    }

    async fn list_sessions(
        &self,
        status: Option<SessionStatus>,
        limit: i64,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut sessions: Vec<ChatSession> = state
            .sessions
            .iter()
            .filter(|s| status.is_none_or(|st| s.status == st))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| std::cmp::Reverse((s.created_at, s.id.0)));
        sessions.truncate(limit.max(0) as usize);
        Ok(sessions)
    }

    async fn update_session_counters(
        &self,
        session_id: SessionId,
        total_messages: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.total_messages = total_messages;
        session.updated_at = updated_at;
        Ok(())
    }

    async fn set_session_status(
        &self,
        session_id: SessionId,
        status: SessionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.status = status;
        session.updated_at = updated_at;
        Ok(())
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<ChatMessage, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_insert_for == Some(message.sender) {
            return Err(RepositoryError::Query("simulated insert failure".to_string()));
        }
        state.writes += 1;
        let stored = ChatMessage {
            id: MessageId(state.messages.len() as i64 + 1),
            session_id: message.session_id,
            visitor_id: message.visitor_id.clone(),
            message_type: message.message_type,
            sender: message.sender,
            content: message.content.clone(),
            created_at: message.created_at,
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn count_messages(&self, session_id: SessionId) -> Result<u32, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .count() as u32)
    }

    async fn session_messages(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn visitor_history(
        &self,
        visitor_id: &VisitorId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .rev()
            .filter(|m| &m.visitor_id == visitor_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<ChatStats, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(ChatStats {
            total_sessions: state.sessions.len() as u64,
            active_sessions: state
                .sessions
                .iter()
                .filter(|s| s.status == SessionStatus::Active)
                .count() as u64,
            total_messages: state.messages.len() as u64,
        })
    }
}
