use crate::application::ports::SettingsStore;
use crate::domain::{SiteSettings, SiteSettingsUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use wedding_errors::AppError;

/// Settings document held behind a lock; updates merge under the write guard.
#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<SiteSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Result<SiteSettings, AppError> {
        Ok(self.settings.read().await.clone())
    }

    async fn update(&self, update: SiteSettingsUpdate) -> Result<SiteSettings, AppError> {
        let mut settings = self.settings.write().await;
        *settings = settings.clone().merge(update);
        Ok(settings.clone())
    }
}
