use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use wedding_errors::AppError;

/// Ranking weight of a single bride or groom vote.
pub const SPECIAL_VOTE_WEIGHT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    fn weight(slot: Option<VoteDirection>) -> i64 {
        match slot {
            Some(Self::Up) => SPECIAL_VOTE_WEIGHT,
            Some(Self::Down) => -SPECIAL_VOTE_WEIGHT,
            None => 0,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(AppError::Validation(format!(
                "Vote direction must be 'up' or 'down', got '{}'",
                other
            ))),
        }
    }
}

/// Holder of one of the two privileged vote slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoupleRole {
    Bride,
    Groom,
}

impl CoupleRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bride => "bride",
            Self::Groom => "groom",
        }
    }
}

impl fmt::Display for CoupleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoupleRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bride" => Ok(Self::Bride),
            "groom" => Ok(Self::Groom),
            other => Err(AppError::Forbidden(format!("'{}' is not a couple role", other))),
        }
    }
}

/// One step of the neutral/up/down toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// Neutral to `direction`.
    Cast(VoteDirection),
    /// Same direction requested again: back to neutral.
    Retract(VoteDirection),
    Switch {
        from: VoteDirection,
        to: VoteDirection,
    },
}

impl VoteTransition {
    pub fn resolve(current: Option<VoteDirection>, requested: VoteDirection) -> Self {
        match current {
            None => Self::Cast(requested),
            Some(existing) if existing == requested => Self::Retract(existing),
            Some(existing) => Self::Switch {
                from: existing,
                to: requested,
            },
        }
    }

    /// State of the toggle after this transition.
    pub fn next_state(&self) -> Option<VoteDirection> {
        match self {
            Self::Cast(direction) => Some(*direction),
            Self::Retract(_) => None,
            Self::Switch { to, .. } => Some(*to),
        }
    }

    /// Change to apply to `(upvotes, downvotes)`.
    pub fn tally_delta(&self) -> (i32, i32) {
        fn unit(direction: VoteDirection, sign: i32) -> (i32, i32) {
            match direction {
                VoteDirection::Up => (sign, 0),
                VoteDirection::Down => (0, sign),
            }
        }

        match self {
            Self::Cast(direction) => unit(*direction, 1),
            Self::Retract(direction) => unit(*direction, -1),
            Self::Switch { from, to } => {
                let (up_out, down_out) = unit(*from, -1);
                let (up_in, down_in) = unit(*to, 1);
                (up_out + up_in, down_out + down_in)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRequest {
    pub id: uuid::Uuid,
    pub requester_name: String,
    pub title: String,
    pub artist: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub voters: BTreeMap<String, VoteDirection>,
    pub bride_vote: Option<VoteDirection>,
    pub groom_vote: Option<VoteDirection>,
}

impl SongRequest {
    /// Builds a fresh request. Inputs are expected to be cleaned already.
    pub fn new(requester_name: String, title: String, artist: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            requester_name,
            title,
            artist,
            created_at: chrono::Utc::now(),
            upvotes: 0,
            downvotes: 0,
            voters: BTreeMap::new(),
            bride_vote: None,
            groom_vote: None,
        }
    }

    pub fn vote_of(&self, voter_key: &str) -> Option<VoteDirection> {
        self.voters.get(voter_key).copied()
    }

    pub fn special_vote(&self, role: CoupleRole) -> Option<VoteDirection> {
        match role {
            CoupleRole::Bride => self.bride_vote,
            CoupleRole::Groom => self.groom_vote,
        }
    }

    /// Applies the tri-state toggle for `voter_key`, keeping both counters
    /// in step with `voters`. A counter that would leave `u32` means the
    /// record had already drifted; it is reported and left untouched.
    pub fn toggle_vote(
        &mut self,
        voter_key: &str,
        direction: VoteDirection,
    ) -> Result<VoteTransition, AppError> {
        let transition = VoteTransition::resolve(self.vote_of(voter_key), direction);
        let (up, down) = transition.tally_delta();

        let (Some(upvotes), Some(downvotes)) = (
            self.upvotes.checked_add_signed(up),
            self.downvotes.checked_add_signed(down),
        ) else {
            return Err(AppError::Internal(format!(
                "Vote counters of song {} are out of step with its voters",
                self.id
            )));
        };

        match transition.next_state() {
            Some(next) => {
                self.voters.insert(voter_key.to_string(), next);
            }
            None => {
                self.voters.remove(voter_key);
            }
        }
        self.upvotes = upvotes;
        self.downvotes = downvotes;

        Ok(transition)
    }

    pub fn toggle_special_vote(&mut self, role: CoupleRole, direction: VoteDirection) -> VoteTransition {
        let transition = VoteTransition::resolve(self.special_vote(role), direction);
        let slot = match role {
            CoupleRole::Bride => &mut self.bride_vote,
            CoupleRole::Groom => &mut self.groom_vote,
        };
        *slot = transition.next_state();
        transition
    }

    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
            + VoteDirection::weight(self.bride_vote)
            + VoteDirection::weight(self.groom_vote)
    }

    /// True when the cached counters agree with the voter map.
    pub fn tally_is_consistent(&self) -> bool {
        let ups = self.voters.values().filter(|d| **d == VoteDirection::Up).count();
        let downs = self.voters.len() - ups;
        ups == self.upvotes as usize && downs == self.downvotes as usize
    }

    pub fn into_view(self, voter_key: Option<&str>) -> SongView {
        let score = self.score();
        let my_vote = voter_key.and_then(|key| self.vote_of(key));
        SongView {
            id: self.id,
            requester_name: self.requester_name,
            title: self.title,
            artist: self.artist,
            created_at: self.created_at,
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            bride_vote: self.bride_vote,
            groom_vote: self.groom_vote,
            score,
            my_vote,
        }
    }
}

/// Highest score first; ties go to the earlier submission, then the lower id.
fn ranking_order(a: &SongRequest, b: &SongRequest) -> Ordering {
    b.score()
        .cmp(&a.score())
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn rank(mut songs: Vec<SongRequest>) -> Vec<SongRequest> {
    songs.sort_by(ranking_order);
    songs
}

/// Form payload of a new request, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSubmission {
    pub requester_name: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
}

/// Song as shown to a guest: no raw voter map, plus score and the caller's vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongView {
    pub id: uuid::Uuid,
    pub requester_name: String,
    pub title: String,
    pub artist: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub bride_vote: Option<VoteDirection>,
    pub groom_vote: Option<VoteDirection>,
    pub score: i64,
    pub my_vote: Option<VoteDirection>,
}
