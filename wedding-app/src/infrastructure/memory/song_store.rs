use crate::application::ports::{song_not_found, SongStore};
use crate::domain::{CoupleRole, SongRequest, VoteDirection};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

/// Songs keyed by id. The dashmap entry guard serializes toggles on the
/// same song while leaving other songs free.
#[derive(Clone, Default)]
pub struct InMemorySongStore {
    songs: Arc<DashMap<Uuid, SongRequest>>,
}

impl InMemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SongStore for InMemorySongStore {
    async fn insert(&self, song: &SongRequest) -> Result<(), AppError> {
        self.songs.insert(song.id, song.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SongRequest>, AppError> {
        let mut songs: Vec<SongRequest> = self.songs.iter().map(|e| e.value().clone()).collect();
        songs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(songs)
    }

    async fn toggle_vote(
        &self,
        id: Uuid,
        voter_key: &str,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError> {
        let mut song = self.songs.get_mut(&id).ok_or_else(|| song_not_found(id))?;
        song.toggle_vote(voter_key, direction)?;
        Ok(song.clone())
    }

    async fn toggle_special_vote(
        &self,
        id: Uuid,
        role: CoupleRole,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError> {
        let mut song = self.songs.get_mut(&id).ok_or_else(|| song_not_found(id))?;
        song.toggle_special_vote(role, direction);
        Ok(song.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.songs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| song_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_voters_are_all_counted() {
        let store = InMemorySongStore::new();
        let song = SongRequest::new("Alex".into(), "Dancing Queen".into(), None);
        store.insert(&song).await.unwrap();
        let song_id = song.id;

        let mut handles = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            let direction = if i % 4 == 0 {
                VoteDirection::Down
            } else {
                VoteDirection::Up
            };
            handles.push(tokio::spawn(async move {
                store
                    .toggle_vote(song_id, &format!("voter-{}", i), direction)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.list().await.unwrap().remove(0);
        assert_eq!(stored.upvotes, 48);
        assert_eq!(stored.downvotes, 16);
        assert_eq!(stored.voters.len(), 64);
        assert!(stored.tally_is_consistent());
    }

    #[tokio::test]
    async fn test_missing_song_is_not_found() {
        let store = InMemorySongStore::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            store.toggle_vote(id, "v1", VoteDirection::Up).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemorySongStore::new();
        let mut first = SongRequest::new("A".into(), "One".into(), None);
        first.created_at -= chrono::Duration::seconds(30);
        let second = SongRequest::new("B".into(), "Two".into(), None);
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let titles: Vec<String> = store.list().await.unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Two", "One"]);
    }
}
