//! Content host for the active tab.
//!
//! Derives what the active tab shows (the new-tab surface or proxied
//! content), fetches pending content through a [`ContentFetcher`], and
//! reports completion back to the tab set. The only tab field it ever
//! changes is the loading flag, and only via `mark_loaded`.

use async_trait::async_trait;
use serde::Serialize;

use crate::api::routes::proxy_url;
use crate::managers::tab_manager::TabSetTrait;
use crate::types::errors::ApiError;
use crate::types::tab::LoadTicket;

/// Opaque fetch capability for a location's content.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String, ApiError>;
}

/// What the content area shows for the active tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ContentView {
    NewTab {
        tab_id: String,
    },
    Proxied {
        tab_id: String,
        location: String,
        proxy_url: String,
        is_loading: bool,
    },
}

/// A content load that has been started but not yet fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub location: String,
}

/// Result of one content load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub location: String,
    pub result: Result<String, ApiError>,
    /// Whether the completion cleared the tab's loading flag. False when the
    /// tab was closed or navigated again while the fetch was in flight.
    pub applied: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ContentHost;

impl ContentHost {
    pub fn new() -> Self {
        Self
    }

    pub fn view<T: TabSetTrait + ?Sized>(&self, tabs: &T) -> ContentView {
        let tab = tabs.active_tab();
        if tab.is_new_tab() {
            return ContentView::NewTab {
                tab_id: tab.id.clone(),
            };
        }
        ContentView::Proxied {
            tab_id: tab.id.clone(),
            location: tab.location.clone(),
            proxy_url: proxy_url(&tab.location),
            is_loading: tab.is_loading,
        }
    }

    /// The active tab's outstanding load, if any. The new-tab surface never
    /// fetches anything: a load pending on it completes right here.
    pub fn begin<T: TabSetTrait + ?Sized>(&self, tabs: &mut T) -> Option<LoadRequest> {
        let tab = tabs.active_tab();
        let ticket = tabs.pending_ticket(&tab.id)?;
        if tab.is_new_tab() {
            self.complete(tabs, &ticket);
            return None;
        }
        Some(LoadRequest {
            location: tab.location.clone(),
            ticket,
        })
    }

    /// Fetches the content for `request` without touching the tab set.
    pub async fn fetch<F: ContentFetcher + ?Sized>(&self, fetcher: &F, request: LoadRequest) -> LoadOutcome {
        let result = fetcher.fetch(&request.location).await;
        match &result {
            Ok(body) => tracing::info!(location = %request.location, bytes = body.len(), "content loaded"),
            Err(err) => tracing::warn!(location = %request.location, error = %err, "content load failed"),
        }
        LoadOutcome {
            ticket: request.ticket,
            location: request.location,
            result,
            applied: false,
        }
    }

    /// Reports a finished load, successful or not.
    pub fn finish<T: TabSetTrait + ?Sized>(&self, tabs: &mut T, outcome: &mut LoadOutcome) {
        outcome.applied = self.complete(tabs, &outcome.ticket);
    }

    /// Completion callback for loads driven outside the host.
    pub fn complete<T: TabSetTrait + ?Sized>(&self, tabs: &mut T, ticket: &LoadTicket) -> bool {
        tabs.mark_loaded(ticket)
    }

    /// Begins, fetches and finishes the active tab's pending load.
    pub async fn load_active<T, F>(&self, tabs: &mut T, fetcher: &F) -> Option<LoadOutcome>
    where
        T: TabSetTrait + ?Sized,
        F: ContentFetcher + ?Sized,
    {
        let request = self.begin(tabs)?;
        let mut outcome = self.fetch(fetcher, request).await;
        self.finish(tabs, &mut outcome);
        Some(outcome)
    }
}
