use serde::{Deserialize, Serialize};

/// A persisted page visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub timestamp: i64,
}
