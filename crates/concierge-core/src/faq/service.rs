//! FAQ service: validated writes and filtered reads over a `FaqRepository`.

use concierge_types::error::{FaqError, RepositoryError};
use concierge_types::faq::{FaqEntry, NewFaqEntry};
use tracing::info;

use crate::faq::repository::FaqRepository;

pub struct FaqService<F: FaqRepository> {
    faq_repo: F,
}

impl<F: FaqRepository> FaqService<F> {
    pub fn new(faq_repo: F) -> Self {
        Self { faq_repo }
    }

    /// Active entries by priority. Categories are stored lowercase; a blank
    /// category means "all categories".
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<FaqEntry>, FaqError> {
        let category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        Ok(self.faq_repo.list_active(category.as_deref()).await?)
    }

    pub async fn create(&self, entry: NewFaqEntry) -> Result<FaqEntry, FaqError> {
        let question = entry.question.trim();
        let answer = entry.answer.trim();
        if question.is_empty() {
            return Err(FaqError::Validation("Question is required".to_string()));
        }
        if answer.is_empty() {
            return Err(FaqError::Validation("Answer is required".to_string()));
        }
        let normalized = NewFaqEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            category: entry
                .category
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty()),
            priority: entry.priority,
        };
        let created = self.faq_repo.create(&normalized).await?;
        info!(faq_id = created.id, category = ?created.category, "FAQ entry created");
        Ok(created)
    }

    pub async fn set_active(&self, id: i64, active: bool) -> Result<(), FaqError> {
        match self.faq_repo.set_active(id, active).await {
            Ok(()) => {
                info!(faq_id = id, active, "FAQ entry visibility changed");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(FaqError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryFaqRepository {
        entries: Mutex<Vec<FaqEntry>>,
        last_category: Mutex<Option<String>>,
    }

    impl FaqRepository for MemoryFaqRepository {
        async fn list_active(&self, category: Option<&str>) -> Result<Vec<FaqEntry>, RepositoryError> {
            *self.last_category.lock().unwrap() = category.map(str::to_string);
            let mut entries: Vec<FaqEntry> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.is_active)
                .filter(|e| category.is_none_or(|c| e.category.as_deref() == Some(c)))
                .cloned()
                .collect();
            entries.sort_by_key(|e| (e.priority, e.id));
            Ok(entries)
        }

        async fn create(&self, entry: &NewFaqEntry) -> Result<FaqEntry, RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            let now = Utc::now();
            let created = FaqEntry {
                id: entries.len() as i64 + 1,
                question: entry.question.clone(),
                answer: entry.answer.clone(),
                category: entry.category.clone(),
                priority: entry.priority,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            entries.push(created.clone());
            Ok(created)
        }

        async fn set_active(&self, id: i64, active: bool) -> Result<(), RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(RepositoryError::NotFound)?;
            entry.is_active = active;
            Ok(())
        }
    }

    fn new_entry(question: &str, category: Option<&str>, priority: i32) -> NewFaqEntry {
        NewFaqEntry {
            question: question.to_string(),
            answer: "An answer.".to_string(),
            category: category.map(str::to_string),
            priority,
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_input() {
        let svc = FaqService::new(MemoryFaqRepository::default());
        let created = svc
            .create(new_entry("  Do you host sites?  ", Some(" Hosting "), 3))
            .await
            .unwrap();
        assert_eq!(created.question, "Do you host sites?");
        assert_eq!(created.category.as_deref(), Some("hosting"));
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_create_requires_question_and_answer() {
        let svc = FaqService::new(MemoryFaqRepository::default());
        let err = svc.create(new_entry(" ", None, 0)).await.unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));

        let mut entry = new_entry("Q?", None, 0);
        entry.answer = String::new();
        let err = svc.create(entry).await.unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }

    #[tokio::test]
    async fn test_blank_category_lists_everything() {
        let svc = FaqService::new(MemoryFaqRepository::default());
        svc.create(new_entry("A?", Some("pricing"), 1)).await.unwrap();
        svc.create(new_entry("B?", Some("services"), 0)).await.unwrap();

        let all = svc.list(Some("   ")).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].question, "B?");
        assert!(svc.faq_repo.last_category.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_active_unknown_id() {
        let svc = FaqService::new(MemoryFaqRepository::default());
        let err = svc.set_active(7, false).await.unwrap_err();
        assert!(matches!(err, FaqError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_deactivated_entries_are_hidden() {
        let svc = FaqService::new(MemoryFaqRepository::default());
        let entry = svc.create(new_entry("A?", None, 0)).await.unwrap();
        svc.set_active(entry.id, false).await.unwrap();
        assert!(svc.list(None).await.unwrap().is_empty());
    }
}
