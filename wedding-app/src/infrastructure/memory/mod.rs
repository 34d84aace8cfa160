//! In-process stores used when no database is configured, and by tests.

mod feedback_store;
mod guest_store;
mod settings_store;
mod song_store;

pub use feedback_store::InMemoryFeedbackStore;
pub use guest_store::InMemoryGuestStore;
pub use settings_store::InMemorySettingsStore;
pub use song_store::InMemorySongStore;
