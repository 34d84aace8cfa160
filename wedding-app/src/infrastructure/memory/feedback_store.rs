use crate::application::ports::{feedback_not_found, FeedbackStore};
use crate::domain::Feedback;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

#[derive(Clone, Default)]
pub struct InMemoryFeedbackStore {
    messages: Arc<DashMap<Uuid, Feedback>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn insert(&self, feedback: &Feedback) -> Result<(), AppError> {
        self.messages.insert(feedback.id, feedback.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Feedback>, AppError> {
        let mut messages: Vec<Feedback> = self.messages.iter().map(|e| e.value().clone()).collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.messages
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| feedback_not_found(id))
    }
}
