use crate::domain::TrackSuggestion;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Track>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track_id: Option<u64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub artwork_url100: Option<String>,
    pub preview_url: Option<String>,
}

impl Track {
    /// Tracks without an id or name are dropped.
    pub fn into_suggestion(self) -> Option<TrackSuggestion> {
        Some(TrackSuggestion {
            id: self.track_id?,
            song: self.track_name?,
            artist: self.artist_name.unwrap_or_default(),
            album: self.collection_name,
            artwork: self.artwork_url100.map(|url| url.replace("100x100", "60x60")),
            preview_url: self.preview_url,
        })
    }
}

impl SearchResponse {
    pub fn into_suggestions(self) -> Vec<TrackSuggestion> {
        self.results
            .into_iter()
            .filter_map(Track::into_suggestion)
            .collect()
    }
}
