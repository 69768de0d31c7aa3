//! FaqRepository trait definition.

use concierge_types::error::RepositoryError;
use concierge_types::faq::{FaqEntry, NewFaqEntry};

/// Repository trait for FAQ entries.
///
/// Implementations live in concierge-infra (e.g., `SqliteFaqRepository`).
pub trait FaqRepository: Send + Sync {
    /// Active entries ordered by priority ascending, optionally for one category.
    fn list_active(
        &self,
        category: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<FaqEntry>, RepositoryError>> + Send;

    /// Insert an active entry; the store assigns the id.
    fn create(
        &self,
        entry: &NewFaqEntry,
    ) -> impl std::future::Future<Output = Result<FaqEntry, RepositoryError>> + Send;

    /// Toggle visibility. Returns `RepositoryError::NotFound` for an unknown id.
    fn set_active(
        &self,
        id: i64,
        active: bool,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
