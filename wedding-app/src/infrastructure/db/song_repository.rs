use super::entities::{song, song_vote, Song, SongVote};
use super::persistence;
use crate::application::ports::{song_not_found, SongStore};
use crate::domain::{CoupleRole, SongRequest, VoteDirection, VoteTransition};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

#[derive(Clone)]
pub struct SongRepository {
    db: Arc<DatabaseConnection>,
}

impl SongRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn parse_direction(value: &str) -> Result<VoteDirection, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Persistence(format!("Unknown vote direction '{}' in storage", value)))
}

fn counter(value: i32) -> Result<u32, AppError> {
    u32::try_from(value).map_err(|_| AppError::Persistence(format!("Negative vote counter {}", value)))
}

fn to_domain(model: song::Model, votes: Vec<song_vote::Model>) -> Result<SongRequest, AppError> {
    let voters = votes
        .into_iter()
        .map(|v| parse_direction(&v.direction).map(|d| (v.voter_key, d)))
        .collect::<Result<BTreeMap<_, _>, AppError>>()?;

    Ok(SongRequest {
        id: model.id,
        requester_name: model.requester_name,
        title: model.title,
        artist: model.artist,
        created_at: model.created_at,
        upvotes: counter(model.upvotes)?,
        downvotes: counter(model.downvotes)?,
        voters,
        bride_vote: model.bride_vote.as_deref().map(parse_direction).transpose()?,
        groom_vote: model.groom_vote.as_deref().map(parse_direction).transpose()?,
    })
}

async fn load<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<SongRequest>, AppError> {
    let Some(model) = Song::find_by_id(id).one(conn).await.map_err(persistence)? else {
        return Ok(None);
    };
    let votes = model.find_related(SongVote).all(conn).await.map_err(persistence)?;
    to_domain(model, votes).map(Some)
}

#[async_trait]
impl SongStore for SongRepository {
    async fn insert(&self, song_data: &SongRequest) -> Result<(), AppError> {
        let active = song::ActiveModel {
            id: Set(song_data.id),
            requester_name: Set(song_data.requester_name.clone()),
            title: Set(song_data.title.clone()),
            artist: Set(song_data.artist.clone()),
            upvotes: Set(0),
            downvotes: Set(0),
            bride_vote: Set(None),
            groom_vote: Set(None),
            created_at: Set(song_data.created_at),
        };
        Song::insert(active).exec(self.db.as_ref()).await.map_err(persistence)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SongRequest>, AppError> {
        let songs = Song::find()
            .order_by_desc(song::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(persistence)?;

        let mut votes_by_song: HashMap<Uuid, Vec<song_vote::Model>> = HashMap::new();
        for vote in SongVote::find().all(self.db.as_ref()).await.map_err(persistence)? {
            votes_by_song.entry(vote.song_id).or_default().push(vote);
        }

        songs
            .into_iter()
            .map(|s| {
                let votes = votes_by_song.remove(&s.id).unwrap_or_default();
                to_domain(s, votes)
            })
            .collect()
    }

    /// Locks the song row, applies the voter row change and moves both
    /// counters with `col = col + delta` in one transaction.
    async fn toggle_vote(
        &self,
        id: Uuid,
        voter_key: &str,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError> {
        let txn = self.db.begin().await.map_err(persistence)?;

        let locked = Song::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(persistence)?
            .ok_or_else(|| song_not_found(id))?;

        let existing = SongVote::find_by_id((id, voter_key.to_string()))
            .one(&txn)
            .await
            .map_err(persistence)?;
        let current = existing
            .as_ref()
            .map(|v| parse_direction(&v.direction))
            .transpose()?;

        let transition = VoteTransition::resolve(current, direction);
        let now = chrono::Utc::now();

        match (transition.next_state(), existing) {
            (None, _) => {
                SongVote::delete_by_id((id, voter_key.to_string()))
                    .exec(&txn)
                    .await
                    .map_err(persistence)?;
            }
            (Some(next), Some(existing)) => {
                let mut active: song_vote::ActiveModel = existing.into();
                active.direction = Set(next.as_str().to_string());
                active.updated_at = Set(now);
                active.update(&txn).await.map_err(persistence)?;
            }
            (Some(next), None) => {
                let active = song_vote::ActiveModel {
                    song_id: Set(id),
                    voter_key: Set(voter_key.to_string()),
                    direction: Set(next.as_str().to_string()),
                    updated_at: Set(now),
                };
                SongVote::insert(active).exec(&txn).await.map_err(persistence)?;
            }
        }

        let (up, down) = transition.tally_delta();
        Song::update_many()
            .col_expr(song::Column::Upvotes, Expr::col(song::Column::Upvotes).add(up))
            .col_expr(song::Column::Downvotes, Expr::col(song::Column::Downvotes).add(down))
            .filter(song::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(persistence)?;

        let updated = load(&txn, id).await?.ok_or_else(|| song_not_found(id))?;
        txn.commit().await.map_err(persistence)?;

        tracing::debug!(
            "Vote {:?} on song {} ({}/{} -> {}/{})",
            transition,
            id,
            locked.upvotes,
            locked.downvotes,
            updated.upvotes,
            updated.downvotes
        );
        Ok(updated)
    }

    async fn toggle_special_vote(
        &self,
        id: Uuid,
        role: CoupleRole,
        direction: VoteDirection,
    ) -> Result<SongRequest, AppError> {
        let txn = self.db.begin().await.map_err(persistence)?;

        let locked = Song::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(persistence)?
            .ok_or_else(|| song_not_found(id))?;

        let (column, slot) = match role {
            CoupleRole::Bride => (song::Column::BrideVote, locked.bride_vote),
            CoupleRole::Groom => (song::Column::GroomVote, locked.groom_vote),
        };
        let current = slot.as_deref().map(parse_direction).transpose()?;
        let next = VoteTransition::resolve(current, direction)
            .next_state()
            .map(|d| d.as_str().to_string());

        Song::update_many()
            .col_expr(column, Expr::value(next))
            .filter(song::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(persistence)?;

        let updated = load(&txn, id).await?.ok_or_else(|| song_not_found(id))?;
        txn.commit().await.map_err(persistence)?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = Song::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(persistence)?;

        if result.rows_affected == 0 {
            return Err(song_not_found(id));
        }
        Ok(())
    }
}
