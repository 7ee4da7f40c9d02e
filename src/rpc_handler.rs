//! RPC method handler for the tabshell JSON-RPC shell.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches one call against the [`ShellApp`]; calls are
//! handled strictly one after another. Content fetches never run inside a
//! call: `content.load` only starts one, and its result is announced later
//! through [`load_event`].

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::schema::{parse_input, InsertDownload, InsertFeedback, UpdateDownload};
use crate::app::ShellApp;
use crate::managers::tab_manager::TabSetTrait;
use crate::services::content_host::LoadOutcome;
use crate::types::errors::ApiError;
use crate::types::tab::LoadTicket;

/// Turns address-bar text into a location. Host-like input without a
/// scheme gets `https://`; anything else is kept as typed.
pub fn normalize_address(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains("://") || trimmed.starts_with("about:") {
        return trimmed.to_string();
    }
    if trimmed.contains('.') && !trimmed.contains(char::is_whitespace) {
        return format!("https://{}", trimmed);
    }
    trimmed.to_string()
}

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Tab named by `params.id`, or the active tab when absent.
fn target_tab(app: &ShellApp, params: &Value) -> String {
    params
        .get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| app.tabs.active_tab_id().to_string())
}

fn navigation_result(app: &ShellApp, tab_id: &str, ticket: Option<LoadTicket>) -> Result<Value, String> {
    Ok(json!({
        "ticket": to_json(ticket)?,
        "tab": to_json(app.tabs.tab(tab_id))?,
    }))
}

/// Routes a remote result through the notification channel.
fn remote<T: Serialize>(app: &mut ShellApp, result: Result<T, ApiError>) -> Result<Value, String> {
    match result {
        Ok(value) => to_json(value),
        Err(err) => {
            let message = err.user_message();
            app.notifications.report_error(&err);
            Err(message)
        }
    }
}

/// Event line announcing a finished content load.
pub fn load_event(app: &ShellApp, outcome: &LoadOutcome) -> Value {
    let (content, error) = match &outcome.result {
        Ok(body) => (Some(body.as_str()), None),
        Err(err) => (None, Some(err.user_message())),
    };
    json!({
        "event": "content.loaded",
        "ticket": outcome.ticket,
        "applied": outcome.applied,
        "location": outcome.location,
        "content": content,
        "error": error,
        "view": app.host.view(&app.tabs),
    })
}

/// Dispatch a JSON-RPC method call to the shell.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut ShellApp, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tabs ───
        "tab.open" => {
            let id = app.tabs.open_tab();
            Ok(json!({"id": id}))
        }
        "tab.close" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            app.tabs.close_tab(id);
            Ok(json!({"activeTabId": app.tabs.active_tab_id(), "count": app.tabs.tab_count()}))
        }
        "tab.activate" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            app.tabs.activate_tab(id);
            Ok(json!({"activeTabId": app.tabs.active_tab_id()}))
        }
        "tab.navigate" => {
            let url = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let tab_id = target_tab(app, params);
            let location = normalize_address(url);
            let ticket = app.tabs.navigate(&tab_id, &location);
            navigation_result(app, &tab_id, ticket)
        }
        "tab.reload" => {
            let tab_id = target_tab(app, params);
            let ticket = app.tabs.reload(&tab_id);
            navigation_result(app, &tab_id, ticket)
        }
        "tab.back" => {
            let tab_id = target_tab(app, params);
            let ticket = app.tabs.go_back(&tab_id);
            navigation_result(app, &tab_id, ticket)
        }
        "tab.forward" => {
            let tab_id = target_tab(app, params);
            let ticket = app.tabs.go_forward(&tab_id);
            navigation_result(app, &tab_id, ticket)
        }
        "tab.loaded" => {
            let ticket: LoadTicket =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid ticket: {}", e))?;
            let applied = app.host.complete(&mut app.tabs, &ticket);
            Ok(json!({"applied": applied}))
        }
        "tab.list" => Ok(json!({
            "tabs": to_json(app.tabs.tabs())?,
            "activeTabId": app.tabs.active_tab_id(),
        })),
        "tab.active" => to_json(app.tabs.active_tab()),

        // ─── Content ───
        "content.view" => to_json(app.host.view(&app.tabs)),
        "content.load" => {
            let started = app.start_pending_load();
            Ok(json!({
                "started": to_json(started)?,
                "view": to_json(app.host.view(&app.tabs))?,
            }))
        }

        // ─── Feedback ───
        "feedback.submit" => {
            let input: InsertFeedback = match parse_input(params.clone()) {
                Ok(input) => input,
                Err(err) => return remote::<()>(app, Err(err.into())),
            };
            let result = app.submit_feedback(&input).await;
            result.map_err(|e| e.user_message()).and_then(to_json)
        }

        // ─── History ───
        "history.list" => {
            let result = app.client.list_history().await;
            remote(app, result)
        }

        // ─── Downloads ───
        "downloads.list" => {
            let result = app.client.list_downloads().await;
            remote(app, result)
        }
        "downloads.create" => {
            let input: InsertDownload = match parse_input(params.clone()) {
                Ok(input) => input,
                Err(err) => return remote::<()>(app, Err(err.into())),
            };
            let result = app.client.create_download(&input).await;
            remote(app, result)
        }
        "downloads.update" => {
            let id = params.get("id").and_then(|v| v.as_i64()).ok_or("missing id")?;
            let mut body = params.clone();
            if let Some(map) = body.as_object_mut() {
                map.remove("id");
            }
            let input: UpdateDownload = match parse_input(body) {
                Ok(input) => input,
                Err(err) => return remote::<()>(app, Err(err.into())),
            };
            let result = app.client.update_download(id, &input).await;
            remote(app, result)
        }

        // ─── Notifications ───
        "notifications.drain" => to_json(app.notifications.drain()),

        _ => Err(format!("unknown method: {}", method)),
    }
}
