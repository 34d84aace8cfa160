use super::entities::{feedback, Feedback as FeedbackEntity};
use super::persistence;
use crate::application::ports::{feedback_not_found, FeedbackStore};
use crate::domain::Feedback;
use async_trait::async_trait;
use sea_orm::{entity::*, query::*, DatabaseConnection};
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

#[derive(Clone)]
pub struct FeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedbackRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: feedback::Model) -> Feedback {
    Feedback {
        id: model.id,
        message: model.message,
        page: model.page,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}

#[async_trait]
impl FeedbackStore for FeedbackRepository {
    async fn insert(&self, feedback_data: &Feedback) -> Result<(), AppError> {
        let active = feedback::ActiveModel {
            id: Set(feedback_data.id),
            message: Set(feedback_data.message.clone()),
            page: Set(feedback_data.page.clone()),
            user_agent: Set(feedback_data.user_agent.clone()),
            created_at: Set(feedback_data.created_at),
        };
        FeedbackEntity::insert(active)
            .exec(self.db.as_ref())
            .await
            .map_err(persistence)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Feedback>, AppError> {
        let messages = FeedbackEntity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .order_by_asc(feedback::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(persistence)?;

        Ok(messages.into_iter().map(to_domain).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = FeedbackEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(persistence)?;

        if result.rows_affected == 0 {
            return Err(feedback_not_found(id));
        }
        Ok(())
    }
}
