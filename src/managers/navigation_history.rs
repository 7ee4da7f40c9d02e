//! Per-tab back/forward history.
//!
//! Holds the visited locations of one tab, oldest first, and a cursor at the
//! entry currently shown. A fresh history is `[""]` with the cursor at 0.

use serde::Serialize;

/// Ordered stack of visited locations with a current-position cursor.
///
/// Invariants: `entries` is never empty and `cursor < entries.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![String::new()],
            cursor: 0,
        }
    }

    /// Records a new location. Forward entries past the cursor are dropped
    /// before appending.
    pub fn push(&mut self, location: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location.to_string());
        self.cursor = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Moves the cursor one entry back and returns the location there.
    /// Returns `None` at the oldest entry.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Moves the cursor one entry forward and returns the location there.
    /// Returns `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// The location under the cursor.
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}
