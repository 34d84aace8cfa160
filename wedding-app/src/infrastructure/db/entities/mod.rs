pub mod feedback;
pub mod guest;
pub mod site_setting;
pub mod song;
pub mod song_vote;

pub use feedback::Entity as Feedback;
pub use guest::Entity as Guest;
pub use site_setting::Entity as SiteSetting;
pub use song::Entity as Song;
pub use song_vote::Entity as SongVote;
