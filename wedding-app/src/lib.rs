pub mod domain;

#[cfg(feature = "server")]
pub mod application;

#[cfg(feature = "server")]
pub mod infrastructure;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
mod app_context;

#[cfg(feature = "server")]
pub use app_context::{AppContext, Stores};
#[cfg(feature = "server")]
pub use config::Config;
