use serde::{Deserialize, Serialize};

/// Page recorded when the guest came straight to the feedback form.
pub const DIRECT_PAGE: &str = "direct";

/// A message left on the feedback wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: uuid::Uuid,
    pub message: String,
    pub page: String,
    pub user_agent: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Feedback {
    pub fn new(message: String, page: String, user_agent: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            message,
            page,
            user_agent,
            created_at: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub message: String,
    /// Where the guest came from; absent means [`DIRECT_PAGE`].
    #[serde(default)]
    pub page: Option<String>,
}
