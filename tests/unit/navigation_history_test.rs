//! Unit tests for the per-tab back/forward history.

use tabshell::managers::navigation_history::NavigationHistory;

fn history_of(locations: &[&str]) -> NavigationHistory {
    let mut history = NavigationHistory::new();
    for location in locations {
        history.push(location);
    }
    history
}

#[test]
fn test_fresh_history_cannot_move() {
    let mut history = NavigationHistory::new();
    assert!(!history.can_go_back());
    assert!(!history.can_go_forward());
    assert_eq!(history.back(), None);
    assert_eq!(history.forward(), None);
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_push_moves_cursor_to_end() {
    let history = history_of(&["https://a.example", "https://b.example"]);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.current(), "https://b.example");
    assert_eq!(history.entries().len(), 3);
}

#[test]
fn test_back_then_forward_returns_to_same_entry() {
    let mut history = history_of(&["https://a.example", "https://b.example"]);
    assert_eq!(history.back(), Some("https://a.example"));
    assert!(history.can_go_forward());
    assert_eq!(history.forward(), Some("https://b.example"));
    assert!(!history.can_go_forward());
}

#[test]
fn test_back_reaches_placeholder_entry() {
    let mut history = history_of(&["https://a.example"]);
    assert_eq!(history.back(), Some(""));
    assert_eq!(history.back(), None);
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_branching_discards_forward_entries() {
    let mut history = history_of(&["A", "B", "C"]);
    history.back();
    history.back();
    history.push("D");
    assert_eq!(history.entries(), &["", "A", "D"]);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.forward(), None);
}

#[test]
fn test_repeated_location_is_a_new_entry() {
    let history = history_of(&["A", "A"]);
    assert_eq!(history.entries(), &["", "A", "A"]);
}
