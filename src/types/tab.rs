use serde::{Deserialize, Serialize};

use crate::managers::navigation_history::NavigationHistory;

/// Title shown for a tab that has not committed a location yet.
pub const NEW_TAB_TITLE: &str = "New Tab";

/// A single tab: identity, display title, current location, load state and
/// its own back/forward history.
///
/// An empty `location` is the "new tab" placeholder state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub id: String,
    pub title: String,
    pub location: String,
    pub history: NavigationHistory,
    pub is_loading: bool,
    /// Sequence number of the latest navigation intent for this tab.
    pub load_seq: u64,
}

impl TabRecord {
    /// A freshly opened tab with the placeholder title and a `[""]` history.
    pub fn fresh(id: String) -> Self {
        Self {
            id,
            title: NEW_TAB_TITLE.to_string(),
            location: String::new(),
            history: NavigationHistory::new(),
            is_loading: false,
            load_seq: 0,
        }
    }

    pub fn is_new_tab(&self) -> bool {
        self.location.is_empty()
    }
}

/// Identifies one in-flight content load.
///
/// Completions are matched by tab id and sequence number, never by position,
/// so a late completion for a closed, reset or re-navigated tab is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTicket {
    pub tab_id: String,
    pub seq: u64,
}
