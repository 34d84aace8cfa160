mod feedback;
mod guest;
mod settings;
mod song;
mod track;

pub use feedback::{Feedback, FeedbackSubmission, DIRECT_PAGE};
pub use guest::{parse_guest_import, Guest, GuestStats, GuestUpdate, NewGuest, RsvpStatus};
pub use settings::{FunFact, Pet, SiteSettings, SiteSettingsUpdate, TimelineEntry};
pub use song::{
    rank, CoupleRole, SongRequest, SongSubmission, SongView, VoteDirection, VoteTransition,
    SPECIAL_VOTE_WEIGHT,
};
pub use track::TrackSuggestion;
