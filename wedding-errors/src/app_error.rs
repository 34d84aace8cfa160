use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Persistence(String),

    #[error("Song search failed: {0}")]
    SearchFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Missing or invalid credentials")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::NotFound(_) => "That entry no longer exists. Refresh and try again.",
            Self::Persistence(_) => "We couldn't save that just now. Please try again.",
            Self::SearchFailed(_) => "Song search is unavailable right now.",
            Self::RateLimited(msg) => msg,
            Self::Unauthorized => "Please sign in first.",
            Self::Forbidden(_) => "You are not allowed to do that.",
            Self::Internal(_) => "Something went wrong on our side.",
        }
    }

    /// Failures the caller may retry unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::SearchFailed(_))
    }
}

#[cfg(feature = "server")]
mod server_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthorized => StatusCode::UNAUTHORIZED,
                AppError::Forbidden(_) => StatusCode::FORBIDDEN,
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::SearchFailed(_) => StatusCode::BAD_GATEWAY,
                AppError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let message = self.user_message().to_string();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(AppError::Persistence("timeout".into()).is_transient());
        assert!(AppError::SearchFailed("502".into()).is_transient());
        assert!(!AppError::Validation("title".into()).is_transient());
        assert!(!AppError::NotFound("Song".into()).is_transient());
    }

    #[test]
    fn test_validation_message_is_shown_to_user() {
        let err = AppError::Validation("Song title is required".into());
        assert_eq!(err.user_message(), "Song title is required");
        assert_eq!(err.to_string(), "Invalid input: Song title is required");
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_status_codes() {
        use axum::http::StatusCode;

        assert_eq!(AppError::NotFound("Song".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Persistence("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
