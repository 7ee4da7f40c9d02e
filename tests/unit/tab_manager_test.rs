//! Unit tests for the tab set controller: lifecycle, activation, navigation
//! and stale-completion handling.

use rstest::rstest;
use tabshell::managers::tab_manager::{
    IdProvider, SequentialIdProvider, TabSetController, TabSetTrait, UuidIdProvider,
};
use tabshell::types::tab::{LoadTicket, NEW_TAB_TITLE};

fn controller() -> TabSetController {
    TabSetController::new(Box::new(SequentialIdProvider::new()))
}

#[test]
fn test_new_controller_has_one_fresh_active_tab() {
    let tabs = controller();
    assert_eq!(tabs.tab_count(), 1);
    let active = tabs.active_tab();
    assert_eq!(active.id, "tab-1");
    assert_eq!(tabs.active_tab_id(), "tab-1");
    assert_eq!(active.title, NEW_TAB_TITLE);
    assert_eq!(active.location, "");
    assert!(!active.is_loading);
    assert_eq!(active.history.entries(), &[""]);
}

#[test]
fn test_default_controller_uses_uuid_ids() {
    let tabs = TabSetController::default();
    assert!(uuid::Uuid::parse_str(tabs.active_tab_id()).is_ok());
}

#[test]
fn test_id_providers_issue_unique_ids() {
    let mut seq = SequentialIdProvider::new();
    assert_eq!(seq.next_id(), "tab-1");
    assert_eq!(seq.next_id(), "tab-2");
    let mut uuids = UuidIdProvider;
    assert_ne!(uuids.next_id(), uuids.next_id());
}

#[test]
fn test_open_tab_appends_and_activates() {
    let mut tabs = controller();
    let id = tabs.open_tab();
    assert_eq!(id, "tab-2");
    assert_eq!(tabs.tab_count(), 2);
    assert_eq!(tabs.active_tab_id(), "tab-2");
    assert_eq!(tabs.tabs().last().map(|t| t.id.as_str()), Some("tab-2"));
}

#[test]
fn test_closing_first_active_tab_activates_next() {
    let mut tabs = controller();
    tabs.open_tab();
    tabs.activate_tab("tab-1");
    tabs.close_tab("tab-1");
    assert_eq!(tabs.tab_count(), 1);
    assert_eq!(tabs.active_tab_id(), "tab-2");
}

#[test]
fn test_closing_first_of_three_active_tabs_activates_second() {
    let mut tabs = controller();
    tabs.open_tab();
    tabs.open_tab();
    tabs.activate_tab("tab-1");

    tabs.close_tab("tab-1");

    let ids: Vec<_> = tabs.tabs().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["tab-2", "tab-3"]);
    assert_eq!(tabs.active_tab_id(), "tab-2");
}

#[test]
fn test_closing_middle_active_tab_activates_first() {
    let mut tabs = controller();
    tabs.open_tab();
    tabs.open_tab();
    tabs.activate_tab("tab-2");
    tabs.close_tab("tab-2");
    assert_eq!(tabs.active_tab_id(), "tab-1");
}

#[test]
fn test_closing_active_tab_activates_predecessor() {
    let mut tabs = controller();
    tabs.open_tab();
    tabs.open_tab();
    tabs.activate_tab("tab-3");
    tabs.close_tab("tab-3");
    assert_eq!(tabs.active_tab_id(), "tab-2");
}

#[test]
fn test_closing_background_tab_keeps_active() {
    let mut tabs = controller();
    tabs.open_tab();
    tabs.open_tab();
    tabs.close_tab("tab-1");
    assert_eq!(tabs.active_tab_id(), "tab-3");
    assert_eq!(tabs.tab_count(), 2);
}

#[test]
fn test_closing_sole_tab_resets_it() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "https://example.com");
    tabs.close_tab("tab-1");

    assert_eq!(tabs.tab_count(), 1);
    let tab = tabs.active_tab();
    assert_eq!(tab.id, "tab-2");
    assert_eq!(tabs.active_tab_id(), "tab-2");
    assert_eq!(tab.title, NEW_TAB_TITLE);
    assert_eq!(tab.location, "");
    assert_eq!(tab.history.entries(), &[""]);
    assert_eq!(tab.history.cursor(), 0);
    assert!(!tab.is_loading);
}

#[rstest]
#[case("close")]
#[case("activate")]
#[case("navigate")]
#[case("reload")]
#[case("back")]
#[case("forward")]
fn test_unknown_tab_is_a_no_op(#[case] op: &str) {
    let mut tabs = controller();
    tabs.open_tab();
    let before = tabs.tabs().to_vec();
    let active_before = tabs.active_tab_id().to_string();

    let ticket = match op {
        "close" => {
            tabs.close_tab("missing");
            None
        }
        "activate" => {
            tabs.activate_tab("missing");
            None
        }
        "navigate" => tabs.navigate("missing", "https://example.com"),
        "reload" => tabs.reload("missing"),
        "back" => tabs.go_back("missing"),
        _ => tabs.go_forward("missing"),
    };

    assert!(ticket.is_none());
    assert_eq!(tabs.tabs(), before.as_slice());
    assert_eq!(tabs.active_tab_id(), active_before);
}

#[test]
fn test_navigate_commits_location_and_starts_loading() {
    let mut tabs = controller();
    let ticket = tabs.navigate("tab-1", "https://example.com").unwrap();
    let tab = tabs.tab("tab-1").unwrap();
    assert_eq!(tab.location, "https://example.com");
    assert_eq!(tab.title, "https://example.com");
    assert!(tab.is_loading);
    assert_eq!(tab.history.entries(), &["", "https://example.com"]);
    assert_eq!(ticket, LoadTicket { tab_id: "tab-1".into(), seq: 1 });
}

#[test]
fn test_navigate_background_tab_keeps_active() {
    let mut tabs = controller();
    tabs.open_tab();
    tabs.navigate("tab-1", "https://example.com");
    assert_eq!(tabs.active_tab_id(), "tab-2");
    assert!(tabs.active_tab().is_new_tab());
}

#[test]
fn test_back_at_start_leaves_state_unchanged() {
    let mut tabs = controller();
    let before = tabs.tab("tab-1").cloned();
    assert!(tabs.go_back("tab-1").is_none());
    assert_eq!(tabs.tab("tab-1").cloned(), before);
}

#[test]
fn test_back_and_forward_move_location() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "A");
    tabs.navigate("tab-1", "B");

    assert!(tabs.go_back("tab-1").is_some());
    assert_eq!(tabs.tab("tab-1").unwrap().location, "A");
    assert!(tabs.go_forward("tab-1").is_some());
    assert_eq!(tabs.tab("tab-1").unwrap().location, "B");
    assert!(tabs.go_forward("tab-1").is_none());
}

#[test]
fn test_navigate_after_back_truncates_forward_history() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "A");
    tabs.navigate("tab-1", "B");
    tabs.navigate("tab-1", "C");
    tabs.go_back("tab-1");
    tabs.go_back("tab-1");
    tabs.navigate("tab-1", "D");

    let history = &tabs.tab("tab-1").unwrap().history;
    assert_eq!(history.entries(), &["", "A", "D"]);
    assert_eq!(history.cursor(), 2);
}

#[test]
fn test_reload_repushes_current_location() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "A");
    let ticket = tabs.reload("tab-1").unwrap();
    assert_eq!(ticket.seq, 2);
    assert_eq!(tabs.tab("tab-1").unwrap().history.entries(), &["", "A", "A"]);
}

#[test]
fn test_mark_loaded_clears_loading() {
    let mut tabs = controller();
    let ticket = tabs.navigate("tab-1", "A").unwrap();
    assert!(tabs.mark_loaded(&ticket));
    assert!(!tabs.tab("tab-1").unwrap().is_loading);
    assert!(tabs.pending_ticket("tab-1").is_none());
    // Completing twice has no further effect.
    assert!(!tabs.mark_loaded(&ticket));
}

#[test]
fn test_stale_completion_is_ignored() {
    let mut tabs = controller();
    let first = tabs.navigate("tab-1", "A").unwrap();
    let second = tabs.navigate("tab-1", "B").unwrap();

    assert!(!tabs.mark_loaded(&first));
    assert!(tabs.tab("tab-1").unwrap().is_loading);
    assert_eq!(tabs.pending_ticket("tab-1"), Some(second.clone()));

    assert!(tabs.mark_loaded(&second));
    assert!(!tabs.tab("tab-1").unwrap().is_loading);
}

#[test]
fn test_completion_for_closed_tab_is_ignored() {
    let mut tabs = controller();
    tabs.open_tab();
    let ticket = tabs.navigate("tab-1", "A").unwrap();
    tabs.close_tab("tab-1");
    assert!(!tabs.mark_loaded(&ticket));
    assert_eq!(tabs.tab_count(), 1);
}

#[test]
fn test_completion_for_reset_tab_is_ignored() {
    let mut tabs = controller();
    let ticket = tabs.navigate("tab-1", "A").unwrap();
    tabs.close_tab("tab-1");
    assert!(!tabs.mark_loaded(&ticket));
    assert!(tabs.active_tab().is_new_tab());
}

#[test]
fn test_tab_serializes_camel_case() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "A");
    let value = serde_json::to_value(tabs.active_tab()).unwrap();
    assert_eq!(value["isLoading"], true);
    assert_eq!(value["loadSeq"], 1);
    assert_eq!(value["history"]["cursor"], 1);
}
