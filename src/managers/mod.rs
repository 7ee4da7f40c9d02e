// tabshell state managers
// Managers handle stateful operations: the tab set and its per-tab history,
// plus the SQLite-backed feedback, history and download records.

pub mod download_manager;
pub mod feedback_manager;
pub mod history_manager;
pub mod navigation_history;
pub mod tab_manager;
