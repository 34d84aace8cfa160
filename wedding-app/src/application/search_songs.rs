use crate::domain::TrackSuggestion;
use crate::infrastructure::itunes::ItunesClient;
use wedding_errors::AppError;

/// Song lookup for the request form.
pub struct SearchSongs {
    client: ItunesClient,
}

impl SearchSongs {
    pub fn new(client: ItunesClient) -> Self {
        Self { client }
    }

    pub async fn execute(&self, query: &str) -> Result<Vec<TrackSuggestion>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Missing query parameter".to_string()));
        }
        self.client.search(query).await
    }
}
