use crate::domain::{
    CoupleRole, Feedback, Guest, GuestUpdate, SiteSettings, SiteSettingsUpdate, SongRequest,
    VoteDirection,
};
use async_trait::async_trait;
use uuid::Uuid;
use wedding_errors::AppError;

/// Persistence for song requests.
///
/// Every mutating call is atomic per record: the whole vote transition is
/// applied (voter entry and both counters, or the couple slot) or nothing is.
/// Unknown ids yield `AppError::NotFound`.
#[async_trait]
pub trait SongStore: Send + Sync {
    async fn insert(&self, song: &SongRequest) -> Result<(), AppError>;

    async fn list(&self) -> Result<Vec<SongRequest>, AppError>;

    async fn toggle_vote(
        &self,
        id: Uuid,
        voter_key: &str,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError>;

    async fn toggle_special_vote(
        &self,
        id: Uuid,
        role: CoupleRole,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestStore: Send + Sync {
    async fn insert(&self, guest: &Guest) -> Result<(), AppError>;

    /// Stores all of `guests` or none of them.
    async fn insert_many(&self, guests: &[Guest]) -> Result<(), AppError>;

    /// Ordered by name, case-insensitive, then id.
    async fn list(&self) -> Result<Vec<Guest>, AppError>;

    async fn update(&self, id: Uuid, update: GuestUpdate) -> Result<Guest, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert(&self, feedback: &Feedback) -> Result<(), AppError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<Feedback>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// The single site settings document.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored settings, or the defaults when nothing was saved yet.
    async fn load(&self) -> Result<SiteSettings, AppError>;

    /// Merges `update` over the current document atomically and returns
    /// the result.
    async fn update(&self, update: SiteSettingsUpdate) -> Result<SiteSettings, AppError>;
}

pub(crate) fn song_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Song {}", id))
}

pub(crate) fn guest_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Guest {}", id))
}

pub(crate) fn feedback_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Feedback {}", id))
}
