//! Unit tests for the content host: view derivation and load lifecycle,
//! including loads that complete after the tab moved on.

use std::sync::Mutex;

use async_trait::async_trait;
use rstest::rstest;
use tabshell::managers::tab_manager::{SequentialIdProvider, TabSetController, TabSetTrait};
use tabshell::services::content_host::{ContentFetcher, ContentHost, ContentView};
use tabshell::types::errors::ApiError;

/// Fetcher that records requested locations and echoes them back.
#[derive(Default)]
struct RecordingFetcher {
    requested: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl ContentFetcher for RecordingFetcher {
    async fn fetch(&self, location: &str) -> Result<String, ApiError> {
        self.requested.lock().unwrap().push(location.to_string());
        if self.fail {
            return Err(ApiError::Transport {
                status: Some(500),
                message: "upstream down".into(),
            });
        }
        Ok(format!("<p>{}</p>", location))
    }
}

fn controller() -> TabSetController {
    TabSetController::new(Box::new(SequentialIdProvider::new()))
}

#[test]
fn test_view_of_new_tab() {
    let tabs = controller();
    let view = ContentHost::new().view(&tabs);
    assert_eq!(view, ContentView::NewTab { tab_id: "tab-1".into() });
}

#[test]
fn test_view_of_navigated_tab_uses_proxy_url() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "https://example.com/a b");
    let view = ContentHost::new().view(&tabs);
    assert_eq!(
        view,
        ContentView::Proxied {
            tab_id: "tab-1".into(),
            location: "https://example.com/a b".into(),
            proxy_url: "/api/proxy?url=https%3A%2F%2Fexample.com%2Fa%20b".into(),
            is_loading: true,
        }
    );
}

#[test]
fn test_view_serializes_with_kind_tag() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "https://example.com");
    let value = serde_json::to_value(ContentHost::new().view(&tabs)).unwrap();
    assert_eq!(value["kind"], "proxied");
    assert_eq!(value["tabId"], "tab-1");
    assert_eq!(value["isLoading"], true);
    assert!(value["proxyUrl"].as_str().unwrap().starts_with("/api/proxy?url="));
}

#[test]
fn test_begin_on_new_tab_is_none() {
    let mut tabs = controller();
    assert!(ContentHost::new().begin(&mut tabs).is_none());
}

#[rstest]
#[case("reload")]
#[case("navigate-empty")]
fn test_pending_load_on_new_tab_completes_immediately(#[case] op: &str) {
    let mut tabs = controller();
    let ticket = match op {
        "reload" => tabs.reload("tab-1"),
        _ => tabs.navigate("tab-1", ""),
    };
    assert!(ticket.is_some());
    assert!(tabs.active_tab().is_loading);

    assert!(ContentHost::new().begin(&mut tabs).is_none());
    assert!(!tabs.active_tab().is_loading);
    assert!(tabs.pending_ticket("tab-1").is_none());
}

#[test]
fn test_back_to_placeholder_entry_completes_immediately() {
    let mut tabs = controller();
    let first = tabs.navigate("tab-1", "https://example.com").unwrap();
    tabs.mark_loaded(&first);
    tabs.go_back("tab-1");
    assert!(ContentHost::new().begin(&mut tabs).is_none());
    assert!(!tabs.active_tab().is_loading);
}

#[test]
fn test_begin_without_pending_load_is_none() {
    let mut tabs = controller();
    let ticket = tabs.navigate("tab-1", "https://example.com").unwrap();
    tabs.mark_loaded(&ticket);
    assert!(ContentHost::new().begin(&mut tabs).is_none());
}

#[tokio::test]
async fn test_load_active_clears_loading() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "https://example.com");
    let fetcher = RecordingFetcher::default();

    let outcome = ContentHost::new().load_active(&mut tabs, &fetcher).await.unwrap();
    assert!(outcome.applied);
    assert_eq!(outcome.result.unwrap(), "<p>https://example.com</p>");
    assert!(!tabs.active_tab().is_loading);
    assert_eq!(*fetcher.requested.lock().unwrap(), vec!["https://example.com".to_string()]);
}

#[tokio::test]
async fn test_failed_load_still_clears_loading() {
    let mut tabs = controller();
    tabs.navigate("tab-1", "https://example.com");
    let fetcher = RecordingFetcher { fail: true, ..Default::default() };

    let outcome = ContentHost::new().load_active(&mut tabs, &fetcher).await.unwrap();
    assert!(outcome.applied);
    assert!(outcome.result.is_err());
    assert!(!tabs.active_tab().is_loading);
}

#[tokio::test]
async fn test_interleaved_navigation_ignores_stale_completion() {
    let host = ContentHost::new();
    let fetcher = RecordingFetcher::default();
    let mut tabs = controller();

    tabs.navigate("tab-1", "https://a.example");
    let first = host.begin(&mut tabs).unwrap();
    tabs.navigate("tab-1", "https://b.example");
    let second = host.begin(&mut tabs).unwrap();

    let mut stale = host.fetch(&fetcher, first).await;
    host.finish(&mut tabs, &mut stale);
    assert!(!stale.applied);
    assert!(tabs.active_tab().is_loading);

    let mut latest = host.fetch(&fetcher, second).await;
    host.finish(&mut tabs, &mut latest);
    assert!(latest.applied);
    assert!(!tabs.active_tab().is_loading);
    assert_eq!(tabs.active_tab().location, "https://b.example");
}

#[tokio::test]
async fn test_completion_after_close_does_not_touch_new_active_tab() {
    let host = ContentHost::new();
    let fetcher = RecordingFetcher::default();
    let mut tabs = controller();
    let second = tabs.open_tab();
    tabs.navigate(&second, "https://a.example");
    let request = host.begin(&mut tabs).unwrap();

    tabs.navigate("tab-1", "https://b.example");
    tabs.close_tab(&second);
    assert_eq!(tabs.active_tab_id(), "tab-1");

    let mut outcome = host.fetch(&fetcher, request).await;
    host.finish(&mut tabs, &mut outcome);
    assert!(!outcome.applied);
    assert!(tabs.active_tab().is_loading);
}
