mod extract;
mod routes;
mod session_store;

pub use routes::app_router;
pub use session_store::{sweep_expired_sessions, VoterSessionStore};
