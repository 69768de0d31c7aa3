use thiserror::Error;

/// Errors from repository operations (used by trait definitions in concierge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors raised by a reply provider.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },
}

/// Errors from the chat service.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or malformed caller input. Nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("session {0} not found")]
    SessionNotFound(i64),

    #[error(transparent)]
    Store(#[from] RepositoryError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

/// Errors from FAQ operations.
#[derive(Debug, Error)]
pub enum FaqError {
    #[error("{0}")]
    Validation(String),

    #[error("faq entry {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_from_repository() {
        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Store(RepositoryError::Connection)));
        assert_eq!(err.to_string(), "database connection error");
    }

    #[test]
    fn test_reply_error_display() {
        let err = ReplyError::Provider {
            provider: "fixed".to_string(),
            message: "empty".to_string(),
        };
        assert_eq!(err.to_string(), "reply provider 'fixed' failed: empty");
    }
}
