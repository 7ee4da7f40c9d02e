use serde::{Deserialize, Serialize};

/// A persisted piece of user feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub message: String,
    pub rating: i64,
    pub created_at: i64,
}
