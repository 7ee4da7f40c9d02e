//! Shell application core for tabshell.
//!
//! Holds the tab set, the content host, the API client and the notification
//! channel that the RPC front end drives. Content fetches and history writes
//! run on spawned tasks; their results come back as [`ShellEvent`]s, so the
//! tab set is never held across a network call.

use std::collections::HashSet;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::schema::{InsertFeedback, InsertHistory};
use crate::api::ApiClient;
use crate::managers::tab_manager::{TabSetController, TabSetTrait};
use crate::services::content_host::{ContentHost, LoadOutcome};
use crate::services::notification_center::NotificationCenter;
use crate::types::errors::ApiError;
use crate::types::feedback::Feedback;
use crate::types::history::HistoryRecord;
use crate::types::settings::ShellSettings;
use crate::types::tab::LoadTicket;

pub const FEEDBACK_SENT_TITLE: &str = "Feedback Sent";
pub const FEEDBACK_SENT_DESCRIPTION: &str = "Thank you for helping us improve the browser!";

/// Results of background work, delivered back to the shell one at a time.
#[derive(Debug)]
pub enum ShellEvent {
    LoadFinished(LoadOutcome),
    VisitRecorded(Result<HistoryRecord, ApiError>),
}

/// Central shell struct. Events are dispatched to it one at a time.
pub struct ShellApp {
    pub tabs: TabSetController,
    pub host: ContentHost,
    pub client: ApiClient,
    pub notifications: NotificationCenter,
    pub record_history: bool,
    in_flight: HashSet<LoadTicket>,
    events_tx: UnboundedSender<ShellEvent>,
    events_rx: Option<UnboundedReceiver<ShellEvent>>,
}

impl ShellApp {
    /// Creates the shell from settings, with UUID tab ids.
    pub fn new(settings: &ShellSettings) -> Result<Self, ApiError> {
        let client = ApiClient::new(
            &settings.shell.api_base_url,
            Duration::from_secs(settings.shell.request_timeout_secs),
        )?;
        Ok(Self::with_parts(
            TabSetController::default(),
            client,
            settings.shell.record_history,
        ))
    }

    pub fn with_parts(tabs: TabSetController, client: ApiClient, record_history: bool) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            tabs,
            host: ContentHost::new(),
            client,
            notifications: NotificationCenter::new(),
            record_history,
            in_flight: HashSet::new(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Hands out the receiving end of the event channel. Only the first
    /// call gets it.
    pub fn take_events(&mut self) -> Option<UnboundedReceiver<ShellEvent>> {
        self.events_rx.take()
    }

    /// Starts fetching the active tab's pending load on a background task.
    ///
    /// Returns the ticket of a newly started fetch; `None` when nothing is
    /// pending or the pending load is already being fetched. Must be called
    /// from within a tokio runtime.
    pub fn start_pending_load(&mut self) -> Option<LoadTicket> {
        let request = self.host.begin(&mut self.tabs)?;
        if !self.in_flight.insert(request.ticket.clone()) {
            return None;
        }
        let ticket = request.ticket.clone();
        let host = self.host.clone();
        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = host.fetch(&client, request).await;
            let _ = events.send(ShellEvent::LoadFinished(outcome));
        });
        Some(ticket)
    }

    /// Applies a finished background job to the shell state.
    ///
    /// A finished load clears the tab's loading flag when it is still the
    /// latest one; failures become notifications, and a shown page is
    /// recorded as a history visit when recording is enabled.
    pub fn handle_event(&mut self, event: ShellEvent) -> Option<LoadOutcome> {
        match event {
            ShellEvent::LoadFinished(mut outcome) => {
                self.in_flight.remove(&outcome.ticket);
                self.host.finish(&mut self.tabs, &mut outcome);
                match &outcome.result {
                    Ok(_) if outcome.applied && self.record_history => self.record_visit(&outcome),
                    Ok(_) => {}
                    Err(err) => self.notifications.report_error(err),
                }
                Some(outcome)
            }
            ShellEvent::VisitRecorded(result) => {
                self.notifications.report(result);
                None
            }
        }
    }

    fn record_visit(&self, outcome: &LoadOutcome) {
        let title = self
            .tabs
            .tab(&outcome.ticket.tab_id)
            .map(|t| t.title.clone());
        let visit = InsertHistory {
            url: outcome.location.clone(),
            title,
        };
        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let recorded = client.record_visit(&visit).await;
            let _ = events.send(ShellEvent::VisitRecorded(recorded));
        });
    }

    /// Submits feedback; the outcome is always announced as a toast.
    pub async fn submit_feedback(&mut self, input: &InsertFeedback) -> Result<Feedback, ApiError> {
        let result = self.client.create_feedback(input).await;
        match &result {
            Ok(_) => self
                .notifications
                .success(FEEDBACK_SENT_TITLE, FEEDBACK_SENT_DESCRIPTION),
            Err(err) => self.notifications.report_error(err),
        }
        result
    }
}
