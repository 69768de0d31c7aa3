//! Chat service: the message ingestion flow plus history and admin paths.
//!
//! One chat turn is a linear sequence of store calls with no transaction
//! around them. A failure aborts the turn and leaves earlier writes in place.

use chrono::Utc;
use concierge_types::chat::{
    ChatMessage, ChatReply, ChatSession, ChatStats, MessageType, NewMessage, SenderRole,
    SessionId, SessionStatus,
};
use concierge_types::error::{ChatError, RepositoryError};
use concierge_types::visitor::VisitorId;
use tracing::{debug, error, info};

use crate::chat::repository::ChatRepository;
use crate::chat::visitor::generate_visitor_id;
use crate::reply::box_provider::BoxReplyProvider;

/// Orchestrates chat turns on top of a `ChatRepository`.
///
/// Generic over the repository to keep concierge-core free of infra
/// dependencies; tests substitute an in-memory store.
pub struct ChatService<C: ChatRepository> {
    chat_repo: C,
    replies: BoxReplyProvider,
}

impl<C: ChatRepository> ChatService<C> {
    pub fn new(chat_repo: C, replies: BoxReplyProvider) -> Self {
        Self { chat_repo, replies }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    /// Name of the active reply provider.
    pub fn reply_provider_name(&self) -> &str {
        self.replies.name()
    }

    /// Run one chat turn for an inbound visitor message.
    ///
    /// Rejects a missing or blank `message` before touching the store. An
    /// absent `visitor_id` is replaced by a freshly minted one.
    pub async fn handle_message(
        &self,
        message: Option<&str>,
        visitor_id: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(ChatError::Validation("Message is required".to_string())),
        };
        let visitor_id = match VisitorId::from_supplied(visitor_id).map_err(ChatError::Validation)? {
            Some(id) => id,
            None => {
                let id = generate_visitor_id(Utc::now());
                debug!(visitor_id = %id, "Generated visitor id");
                id
            }
        };

        let session_id = self.resolve_session(&visitor_id).await?;

        self.save_message(session_id, &visitor_id, SenderRole::User, message)
            .await
            .inspect_err(|e| {
                error!(%session_id, visitor_id = %visitor_id, error = %e, "Failed to save user message");
            })?;

        let reply = self.replies.reply(message).await.inspect_err(|e| {
            error!(%session_id, provider = self.replies.name(), error = %e, "Reply provider failed");
        })?;

        self.save_message(session_id, &visitor_id, SenderRole::Bot, &reply)
            .await
            .inspect_err(|e| {
                error!(%session_id, visitor_id = %visitor_id, error = %e, "Failed to save bot reply");
            })?;

        let total = self.recount_session(session_id).await.inspect_err(|e| {
            error!(%session_id, error = %e, "Failed to refresh session counters");
        })?;

        info!(%session_id, visitor_id = %visitor_id, total_messages = total, "Chat turn completed");

        Ok(ChatReply {
            reply,
            session_id,
            visitor_id,
            responded_at: Utc::now(),
        })
    }

    /// Reuse the visitor's newest active session or open a new one.
    ///
    /// Read-then-write with no guard: two concurrent first messages from the
    /// same visitor may each create a session.
    async fn resolve_session(&self, visitor_id: &VisitorId) -> Result<SessionId, ChatError> {
        let existing = self
            .chat_repo
            .find_active_session(visitor_id)
            .await
            .inspect_err(|e| {
                error!(visitor_id = %visitor_id, error = %e, "Failed to look up active session");
            })?;

        if let Some(session) = existing {
            debug!(session_id = %session.id, visitor_id = %visitor_id, "Reusing active session");
            return Ok(session.id);
        }

        let session = self
            .chat_repo
            .create_session(visitor_id, Utc::now())
            .await
            .inspect_err(|e| {
                error!(visitor_id = %visitor_id, error = %e, "Failed to create session");
            })?;
        info!(session_id = %session.id, visitor_id = %visitor_id, "Session started");
        Ok(session.id)
    }

    async fn save_message(
        &self,
        session_id: SessionId,
        visitor_id: &VisitorId,
        sender: SenderRole,
        content: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = NewMessage {
            session_id,
            visitor_id: visitor_id.clone(),
            message_type: MessageType::Text,
            sender,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.chat_repo.insert_message(&message).await
    }

    /// Recount a session's messages and store the count with a fresh
    /// updated timestamp. Returns the count written.
    pub async fn recount_session(&self, session_id: SessionId) -> Result<u32, RepositoryError> {
        let total = self.chat_repo.count_messages(session_id).await?;
        self.chat_repo
            .update_session_counters(session_id, total, Utc::now())
            .await?;
        Ok(total)
    }

    // --- Read paths ---

    /// A visitor's most recent messages across sessions, newest first.
    pub async fn history(
        &self,
        visitor_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let visitor_id = VisitorId::from_supplied(Some(visitor_id))
            .map_err(ChatError::Validation)?
            .ok_or_else(|| ChatError::Validation("visitor_id is required".to_string()))?;
        Ok(self.chat_repo.visitor_history(&visitor_id, limit).await?)
    }

    pub async fn get_session(&self, session_id: SessionId) -> Result<ChatSession, ChatError> {
        self.chat_repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound(session_id.0))
    }

    /// Messages of one session in the order they were written.
    pub async fn session_messages(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.get_session(session_id).await?;
        Ok(self.chat_repo.session_messages(session_id).await?)
    }

    pub async fn list_sessions(
        &self,
        status: Option<SessionStatus>,
        limit: i64,
    ) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.chat_repo.list_sessions(status, limit).await?)
    }

    pub async fn stats(&self) -> Result<ChatStats, ChatError> {
        Ok(self.chat_repo.stats().await?)
    }

    // --- Admin operations ---

    /// Post an operator reply into an existing session.
    pub async fn admin_reply(
        &self,
        session_id: SessionId,
        content: &str,
    ) -> Result<ChatMessage, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::Validation("Reply content is required".to_string()));
        }
        let session = self.get_session(session_id).await?;
        let message = self
            .save_message(session_id, &session.visitor_id, SenderRole::Admin, content)
            .await?;
        self.recount_session(session_id).await?;
        info!(%session_id, visitor_id = %session.visitor_id, "Admin reply posted");
        Ok(message)
    }

    /// Close a session. The visitor's next message opens a new one.
    pub async fn close_session(&self, session_id: SessionId) -> Result<(), ChatError> {
        match self
            .chat_repo
            .set_session_status(session_id, SessionStatus::Closed, Utc::now())
            .await
        {
            Ok(()) => {
                info!(%session_id, "Session closed");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(ChatError::SessionNotFound(session_id.0)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::MemoryChatRepository;
    use crate::reply::canned::{CannedReplyProvider, CANNED_REPLIES};
    use crate::reply::fixed::FixedReplyProvider;
    use crate::reply::provider::ReplyProvider;
    use concierge_types::error::ReplyError;

    struct FailingReplyProvider;

    impl ReplyProvider for FailingReplyProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn reply(
            &self,
            _message: &str,
        ) -> impl std::future::Future<Output = Result<String, ReplyError>> + Send {
            std::future::ready(Err(ReplyError::Provider {
                provider: "failing".to_string(),
                message: "upstream unavailable".to_string(),
            }))
        }
    }

    fn service() -> ChatService<MemoryChatRepository> {
        ChatService::new(
            MemoryChatRepository::new(),
            BoxReplyProvider::new(CannedReplyProvider::new()),
        )
    }

    #[tokio::test]
    async fn test_reply_comes_from_canned_set() {
        let svc = service();
        for text in ["hello", "what are your rates?", "x"] {
            let reply = svc.handle_message(Some(text), Some("v-1")).await.unwrap();
            assert!(CANNED_REPLIES.contains(&reply.reply.as_str()));
        }
    }

    #[tokio::test]
    async fn test_missing_visitor_id_is_generated() {
        let svc = service();
        let reply = svc.handle_message(Some("hi"), None).await.unwrap();
        assert!(reply.visitor_id.is_generated(), "got {}", reply.visitor_id);

        // The generated id works as a reference for later turns.
        let again = svc
            .handle_message(Some("hi again"), Some(reply.visitor_id.as_str()))
            .await
            .unwrap();
        assert_eq!(again.session_id, reply.session_id);
    }

    #[tokio::test]
    async fn test_blank_visitor_id_is_generated() {
        let svc = service();
        let reply = svc.handle_message(Some("hi"), Some("  ")).await.unwrap();
        assert!(reply.visitor_id.is_generated());
    }

    #[tokio::test]
    async fn test_first_message_creates_one_session_with_two_messages() {
        let svc = service();
        let reply = svc.handle_message(Some("hello"), Some("new-visitor")).await.unwrap();

        let sessions = svc.chat_repo().sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, reply.session_id);
        assert_eq!(sessions[0].status, SessionStatus::Active);
        assert_eq!(sessions[0].total_messages, 2);

        let messages = svc.chat_repo().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, SenderRole::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].sender, SenderRole::Bot);
        assert_eq!(messages[1].content, reply.reply);
        assert!(messages.iter().all(|m| m.message_type == MessageType::Text));
    }

    #[tokio::test]
    async fn test_existing_active_session_is_reused() {
        let svc = service();
        let first = svc.handle_message(Some("one"), Some("returning")).await.unwrap();
        let second = svc.handle_message(Some("two"), Some("returning")).await.unwrap();

        assert_eq!(first.session_id, second.session_id);
        let sessions = svc.chat_repo().sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].total_messages, 4);
    }

    #[tokio::test]
    async fn test_visitors_get_separate_sessions() {
        let svc = service();
        let a = svc.handle_message(Some("hi"), Some("a")).await.unwrap();
        let b = svc.handle_message(Some("hi"), Some("b")).await.unwrap();
        assert_ne!(a.session_id, b.session_id);
    }

    #[tokio::test]
    async fn test_closed_session_is_not_reused() {
        let svc = service();
        let first = svc.handle_message(Some("one"), Some("v")).await.unwrap();
        svc.close_session(first.session_id).await.unwrap();

        let second = svc.handle_message(Some("two"), Some("v")).await.unwrap();
        assert_ne!(first.session_id, second.session_id);
        assert_eq!(svc.chat_repo().sessions().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_message_writes_nothing() {
        let svc = service();
        for message in [None, Some(""), Some("   \n")] {
            let err = svc.handle_message(message, Some("v")).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
        assert_eq!(svc.chat_repo().writes(), 0);
        assert!(svc.chat_repo().sessions().is_empty());
    }

    #[tokio::test]
    async fn test_overlong_visitor_id_rejected_without_writes() {
        let svc = service();
        let long = "v".repeat(500);
        let err = svc.handle_message(Some("hi"), Some(&long)).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(svc.chat_repo().writes(), 0);
    }

    #[tokio::test]
    async fn test_reply_insert_failure_keeps_user_message() {
        let svc = service();
        svc.chat_repo().fail_inserts_for(SenderRole::Bot);

        let err = svc.handle_message(Some("hello?"), Some("v")).await.unwrap_err();
        assert!(matches!(err, ChatError::Store(_)));

        let messages = svc.chat_repo().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, SenderRole::User);
        assert_eq!(messages[0].content, "hello?");

        // Counters were never refreshed.
        assert_eq!(svc.chat_repo().sessions()[0].total_messages, 0);
    }

    #[tokio::test]
    async fn test_reply_provider_failure_keeps_user_message() {
        let svc = ChatService::new(
            MemoryChatRepository::new(),
            BoxReplyProvider::new(FailingReplyProvider),
        );

        let err = svc.handle_message(Some("hello?"), Some("v")).await.unwrap_err();
        assert!(matches!(err, ChatError::Reply(_)));

        let messages = svc.chat_repo().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, SenderRole::User);
        assert!(messages.iter().all(|m| m.sender != SenderRole::Bot));
        assert_eq!(svc.chat_repo().sessions()[0].total_messages, 0);
    }

    #[tokio::test]
    async fn test_recount_is_idempotent() {
        let svc = service();
        let reply = svc.handle_message(Some("hi"), Some("v")).await.unwrap();

        let first = svc.recount_session(reply.session_id).await.unwrap();
        let second = svc.recount_session(reply.session_id).await.unwrap();
        assert_eq!(first, 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_recount_unknown_session_is_not_found() {
        let svc = service();
        let err = svc.recount_session(SessionId(99)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_fixed_provider_is_used() {
        let svc = ChatService::new(
            MemoryChatRepository::new(),
            BoxReplyProvider::new(FixedReplyProvider::new("We'll call you back.")),
        );
        let reply = svc.handle_message(Some("hi"), Some("v")).await.unwrap();
        assert_eq!(reply.reply, "We'll call you back.");
        assert_eq!(svc.reply_provider_name(), "fixed");
    }

    #[tokio::test]
    async fn test_history_newest_first_with_limit() {
        let svc = service();
        svc.handle_message(Some("first"), Some("v")).await.unwrap();
        svc.handle_message(Some("second"), Some("v")).await.unwrap();
        svc.handle_message(Some("other"), Some("w")).await.unwrap();

        let history = svc.history("v", 3).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].sender, SenderRole::Bot);
        assert_eq!(history[1].content, "second");
        assert!(history.iter().all(|m| m.visitor_id.as_str() == "v"));

        let err = svc.history("  ", 10).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn test_admin_reply_is_counted() {
        let svc = service();
        let reply = svc.handle_message(Some("help"), Some("v")).await.unwrap();

        let msg = svc
            .admin_reply(reply.session_id, "Hi, this is Sam from the studio.")
            .await
            .unwrap();
        assert_eq!(msg.sender, SenderRole::Admin);
        assert_eq!(msg.visitor_id.as_str(), "v");

        let session = svc.get_session(reply.session_id).await.unwrap();
        assert_eq!(session.total_messages, 3);

        let replay = svc.session_messages(reply.session_id).await.unwrap();
        let senders: Vec<SenderRole> = replay.iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![SenderRole::User, SenderRole::Bot, SenderRole::Admin]);
    }

    #[tokio::test]
    async fn test_admin_reply_validation_and_not_found() {
        let svc = service();
        let err = svc.admin_reply(SessionId(1), "").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        let err = svc.admin_reply(SessionId(1), "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound(1)));
    }

    #[tokio::test]
    async fn test_close_unknown_session() {
        let svc = service();
        let err = svc.close_session(SessionId(42)).await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound(42)));
    }

    #[tokio::test]
    async fn test_stats() {
        let svc = service();
        let a = svc.handle_message(Some("hi"), Some("a")).await.unwrap();
        svc.handle_message(Some("hi"), Some("b")).await.unwrap();
        svc.close_session(a.session_id).await.unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.active_sessions, 1);
        assert_eq!(stats.total_messages, 4);
    }
}
