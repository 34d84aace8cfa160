use super::types::SearchResponse;
use crate::domain::TrackSuggestion;
use std::time::Duration;
use wedding_errors::AppError;

pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const DEFAULT_SEARCH_LIMIT: u32 = 8;
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct ItunesClient {
    http_client: reqwest::Client,
    search_url: url::Url,
    limit: u32,
}

impl ItunesClient {
    pub fn new(search_url: url::Url, limit: u32) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            search_url,
            limit,
        }
    }

    pub fn request_url(&self, term: &str) -> url::Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("term", term)
            .append_pair("media", "music")
            .append_pair("entity", "song")
            .append_pair("limit", &self.limit.to_string());
        url
    }

    pub async fn search(&self, term: &str) -> Result<Vec<TrackSuggestion>, AppError> {
        let response = self
            .http_client
            .get(self.request_url(term))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Song search request failed: {}", e);
                AppError::SearchFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Song search error: {} - {}", status, body);
            return Err(AppError::SearchFailed(format!("API error: {}", status)));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::SearchFailed(e.to_string()))?;

        Ok(payload.into_suggestions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_term() {
        let client = ItunesClient::new(
            url::Url::parse(DEFAULT_SEARCH_URL).unwrap(),
            DEFAULT_SEARCH_LIMIT,
        );
        let url = client.request_url("dancing queen & abba");

        assert_eq!(url.host_str(), Some("itunes.apple.com"));
        assert_eq!(
            url.query(),
            Some("term=dancing+queen+%26+abba&media=music&entity=song&limit=8")
        );
    }
}
