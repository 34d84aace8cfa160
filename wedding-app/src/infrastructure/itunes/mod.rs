mod client;
mod types;

pub use client::{ItunesClient, DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_URL};
