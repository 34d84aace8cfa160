mod feedback_wall;
mod guest_book;
pub mod ports;
mod search_songs;
mod site_settings;
mod song_board;

pub use feedback_wall::{FeedbackWall, MAX_FEEDBACK_LENGTH};
pub use guest_book::GuestBook;
pub use ports::{FeedbackStore, GuestStore, SettingsStore, SongStore};
pub use search_songs::SearchSongs;
pub use site_settings::SiteSettingsEditor;
pub use song_board::SongBoard;
