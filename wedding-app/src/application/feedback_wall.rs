use super::ports::FeedbackStore;
use crate::domain::{Feedback, FeedbackSubmission, DIRECT_PAGE};
use crate::infrastructure::security::InputSanitizer;
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

pub const MAX_FEEDBACK_LENGTH: usize = 2000;
const MAX_PAGE_LENGTH: usize = 500;
const MAX_USER_AGENT_LENGTH: usize = 500;

/// Guest messages for the couple, read and pruned from the back office.
#[derive(Clone)]
pub struct FeedbackWall {
    store: Arc<dyn FeedbackStore>,
}

impl FeedbackWall {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Stores a message. Page and user agent are informational and get cut
    /// to length rather than rejected.
    pub async fn submit(
        &self,
        submission: FeedbackSubmission,
        user_agent: Option<&str>,
    ) -> Result<Feedback, AppError> {
        let message =
            InputSanitizer::require_text_within("Message", &submission.message, MAX_FEEDBACK_LENGTH)?;
        let page = submission
            .page
            .as_deref()
            .map(|page| InputSanitizer::truncated(page, MAX_PAGE_LENGTH))
            .filter(|page| !page.is_empty())
            .unwrap_or_else(|| DIRECT_PAGE.to_string());
        let user_agent = user_agent
            .map(|agent| InputSanitizer::truncated(agent, MAX_USER_AGENT_LENGTH))
            .unwrap_or_default();

        let feedback = Feedback::new(message, page, user_agent);
        self.store.insert(&feedback).await?;
        tracing::info!("Feedback received ({}, from {})", feedback.id, feedback.page);
        Ok(feedback)
    }

    pub async fn list(&self) -> Result<Vec<Feedback>, AppError> {
        self.store.list().await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete(id).await?;
        tracing::info!("Feedback {} removed", id);
        Ok(())
    }
}
