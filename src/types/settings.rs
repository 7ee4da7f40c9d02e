use serde::{Deserialize, Serialize};

/// Top-level settings container, stored as JSON.
///
/// Every field has a default so a partial file is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ShellSettings {
    pub server: ServerSettings,
    pub proxy: ProxySettings,
    pub shell: ShellClientSettings,
    pub log_level: LogLevel,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    /// `None` places `tabshell.db` in the platform data directory.
    pub database_path: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            database_path: None,
        }
    }
}

/// Upstream fetch settings for the proxy route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxySettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_body_bytes: usize,
    pub inject_base_href: bool,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("tabshell/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: 5 * 1024 * 1024,
            inject_base_href: true,
        }
    }
}

/// Settings for the RPC shell front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellClientSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Record a history visit after each successful content load.
    pub record_history: bool,
}

impl Default for ShellClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            record_history: true,
        }
    }
}

/// Minimum level written by the tracing subscriber.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
