use serde::{Deserialize, Serialize};

/// One hit from the song search, trimmed to what the request form needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSuggestion {
    pub id: u64,
    pub song: String,
    pub artist: String,
    pub album: Option<String>,
    pub artwork: Option<String>,
    pub preview_url: Option<String>,
}
