use super::entities::{site_setting, SiteSetting};
use super::persistence;
use crate::application::ports::SettingsStore;
use crate::domain::{SiteSettings, SiteSettingsUpdate};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use wedding_errors::AppError;

#[derive(Clone)]
pub struct SettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn from_row(row: Option<site_setting::Model>) -> Result<SiteSettings, AppError> {
    match row {
        Some(row) => serde_json::from_value(row.document).map_err(|e| {
            tracing::error!("Stored site settings are unreadable: {}", e);
            AppError::Internal("Stored site settings are unreadable".to_string())
        }),
        None => Ok(SiteSettings::default()),
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn load(&self) -> Result<SiteSettings, AppError> {
        let row = SiteSetting::find_by_id(site_setting::SITE_KEY.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(persistence)?;
        from_row(row)
    }

    /// Reads the row under `FOR UPDATE`, merges and upserts it in one
    /// transaction. The upsert covers the first save racing another.
    async fn update(&self, update: SiteSettingsUpdate) -> Result<SiteSettings, AppError> {
        let txn = self.db.begin().await.map_err(persistence)?;

        let row = SiteSetting::find_by_id(site_setting::SITE_KEY.to_string())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(persistence)?;
        let merged = from_row(row)?.merge(update);

        let document = serde_json::to_value(&merged)
            .map_err(|e| AppError::Internal(format!("Failed to encode site settings: {}", e)))?;
        let active = site_setting::ActiveModel {
            id: Set(site_setting::SITE_KEY.to_string()),
            document: Set(document),
            updated_at: Set(chrono::Utc::now()),
        };
        SiteSetting::insert(active)
            .on_conflict(
                OnConflict::column(site_setting::Column::Id)
                    .update_columns([site_setting::Column::Document, site_setting::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&txn)
            .await
            .map_err(persistence)?;

        txn.commit().await.map_err(persistence)?;
        Ok(merged)
    }
}
