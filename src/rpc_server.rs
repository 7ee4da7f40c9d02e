//! tabshell RPC shell — JSON-RPC over stdin/stdout for a front-end host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tab.navigate", "params":{"url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Event:    {"event":"content.loaded", "ticket":{...}, "applied":true, ...}
//!
//! Content fetches run on background tasks; their completions are
//! interleaved with incoming requests.

use std::io::Write;
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use tabshell::app::ShellApp;
use tabshell::logging;
use tabshell::rpc_handler::{handle_method, load_event};
use tabshell::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(value: &Value) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", value)?;
    stdout.flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::from_env();
    engine.load()?;
    engine.apply_env_overrides();
    let settings = engine.get_settings().clone();
    logging::init_subscriber(settings.log_level);

    let mut app = ShellApp::new(&settings)?;
    tracing::info!(api = %app.client.base_url(), "shell ready");
    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;

    let mut events = app.take_events().ok_or("event channel already taken")?;
    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            Some(event) = events.recv() => {
                if let Some(outcome) = app.handle_event(event) {
                    emit(&load_event(&app, &outcome))?;
                }
                continue;
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            emit(&json!({"id": id, "error": "rate limit exceeded"}))?;
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                tracing::debug!(method, error = %err, "rpc call failed");
                json!({"id": id, "error": err})
            }
        };
        emit(&response)?;

        // The content area follows the active tab, like a page frame would.
        app.start_pending_load();
    }
    Ok(())
}
