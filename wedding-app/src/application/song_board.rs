use super::ports::SongStore;
use crate::domain::{rank, CoupleRole, SongRequest, SongSubmission, SongView, VoteDirection};
use crate::infrastructure::security::InputSanitizer;
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

const MAX_VOTER_KEY_LENGTH: usize = 128;

/// The song request board: submissions, toggle votes, couple overrides and
/// the ranked view. Role claims are trusted as given; callers verify them.
#[derive(Clone)]
pub struct SongBoard {
    store: Arc<dyn SongStore>,
}

impl SongBoard {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        Self { store }
    }

    /// Creates a new request. Not deduplicated, so retrying a failed call
    /// may leave two records.
    pub async fn submit(&self, submission: SongSubmission) -> Result<SongRequest, AppError> {
        let requester_name = InputSanitizer::require_text("Your name", &submission.requester_name)?;
        let title = InputSanitizer::require_text("Song title", &submission.title)?;
        let artist = match submission.artist.as_deref() {
            Some(artist) => InputSanitizer::optional_text("Artist", artist)?,
            None => None,
        };

        let song = SongRequest::new(requester_name, title, artist);
        self.store.insert(&song).await?;

        tracing::info!("Song requested: '{}' by {} ({})", song.title, song.requester_name, song.id);
        Ok(song)
    }

    pub async fn toggle_vote(
        &self,
        song_id: Uuid,
        voter_key: &str,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError> {
        let voter_key = voter_key.trim();
        if voter_key.is_empty() || voter_key.len() > MAX_VOTER_KEY_LENGTH {
            return Err(AppError::Validation("A valid voter key is required".to_string()));
        }

        let song = self.store.toggle_vote(song_id, voter_key, direction).await?;
        tracing::debug!(
            "Voter {} pressed {} on {}: now {}/{}",
            voter_key,
            direction,
            song_id,
            song.upvotes,
            song.downvotes
        );
        Ok(song)
    }

    pub async fn toggle_special_vote(
        &self,
        song_id: Uuid,
        role: CoupleRole,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError> {
        let song = self.store.toggle_special_vote(song_id, role, direction).await?;
        tracing::info!(
            "{} vote on '{}' is now {}",
            role,
            song.title,
            song.special_vote(role).map_or("neutral", |d| d.as_str())
        );
        Ok(song)
    }

    pub async fn remove(&self, song_id: Uuid) -> Result<(), AppError> {
        self.store.delete(song_id).await?;
        tracing::info!("Song {} removed", song_id);
        Ok(())
    }

    /// Fresh snapshot, ranked, with `voter_key`'s own votes filled in.
    pub async fn ranked(&self, voter_key: Option<&str>) -> Result<Vec<SongView>, AppError> {
        let songs = self.store.list().await?;
        Ok(rank(songs)
            .into_iter()
            .map(|song| song.into_view(voter_key))
            .collect())
    }
}
