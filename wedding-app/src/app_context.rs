use crate::application::{
    FeedbackStore, FeedbackWall, GuestBook, GuestStore, SearchSongs, SettingsStore,
    SiteSettingsEditor, SongBoard, SongStore,
};
use crate::config::Config;
use crate::infrastructure::db::{
    self, FeedbackRepository, GuestRepository, SettingsRepository, SongRepository,
};
use crate::infrastructure::itunes::ItunesClient;
use crate::infrastructure::memory::{
    InMemoryFeedbackStore, InMemoryGuestStore, InMemorySettingsStore, InMemorySongStore,
};
use crate::infrastructure::security::RateLimiter;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use wedding_errors::AppError;

/// One backend per record kind.
#[derive(Clone)]
pub struct Stores {
    pub songs: Arc<dyn SongStore>,
    pub guests: Arc<dyn GuestStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub settings: Arc<dyn SettingsStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            songs: Arc::new(InMemorySongStore::new()),
            guests: Arc::new(InMemoryGuestStore::new()),
            feedback: Arc::new(InMemoryFeedbackStore::new()),
            settings: Arc::new(InMemorySettingsStore::new()),
        }
    }

    pub fn postgres(db: Arc<DatabaseConnection>) -> Self {
        Self {
            songs: Arc::new(SongRepository::new(db.clone())),
            guests: Arc::new(GuestRepository::new(db.clone())),
            feedback: Arc::new(FeedbackRepository::new(db.clone())),
            settings: Arc::new(SettingsRepository::new(db)),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub songs: SongBoard,
    pub guests: GuestBook,
    pub feedback: FeedbackWall,
    pub settings: SiteSettingsEditor,
    pub search: Arc<SearchSongs>,
    /// Shared by every public write: song requests and feedback.
    pub rate_limiter: RateLimiter,
    pub admin_token: Arc<str>,
    pub secure_cookies: bool,
}

impl AppContext {
    pub fn new(config: &Config, stores: Stores) -> Self {
        Self {
            songs: SongBoard::new(stores.songs),
            guests: GuestBook::new(stores.guests),
            feedback: FeedbackWall::new(stores.feedback),
            settings: SiteSettingsEditor::new(stores.settings),
            search: Arc::new(SearchSongs::new(ItunesClient::new(
                config.itunes_search_url.clone(),
                config.search_limit,
            ))),
            rate_limiter: RateLimiter::new(),
            admin_token: Arc::from(config.admin_token.as_str()),
            secure_cookies: config.secure_cookies,
        }
    }

    pub fn in_memory(config: &Config) -> Self {
        Self::new(config, Stores::in_memory())
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set, all data lives in memory only");
            return Ok(Self::in_memory(config));
        };

        let connection = db::create_connection(database_url)
            .await
            .map_err(|e| AppError::Persistence(format!("Failed to connect: {}", e)))?;
        db::run_migrations(&connection)
            .await
            .map_err(|e| AppError::Persistence(format!("Migrations failed: {}", e)))?;
        tracing::info!("Connected to PostgreSQL");

        Ok(Self::new(config, Stores::postgres(Arc::new(connection))))
    }
}
