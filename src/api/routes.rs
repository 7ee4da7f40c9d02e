//! Route table for the tabshell HTTP API.

use serde::Serialize;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// One remote operation. Path parameters are written `:name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
}

impl Route {
    /// The path in axum's `{name}` parameter syntax.
    pub fn axum_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => format!("{{{}}}", param),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

pub const PROXY_FETCH: Route = Route {
    name: "proxy.fetch",
    method: HttpMethod::Get,
    path: "/api/proxy",
};

pub const FEEDBACK_CREATE: Route = Route {
    name: "feedback.create",
    method: HttpMethod::Post,
    path: "/api/feedback",
};

pub const HISTORY_LIST: Route = Route {
    name: "history.list",
    method: HttpMethod::Get,
    path: "/api/history",
};

pub const HISTORY_CREATE: Route = Route {
    name: "history.create",
    method: HttpMethod::Post,
    path: "/api/history",
};

pub const DOWNLOADS_LIST: Route = Route {
    name: "downloads.list",
    method: HttpMethod::Get,
    path: "/api/downloads",
};

pub const DOWNLOADS_CREATE: Route = Route {
    name: "downloads.create",
    method: HttpMethod::Post,
    path: "/api/downloads",
};

pub const DOWNLOADS_UPDATE: Route = Route {
    name: "downloads.update",
    method: HttpMethod::Patch,
    path: "/api/downloads/:id",
};

/// Set by the proxy route on every relayed upstream response. Responses
/// without it are the proxy's own failures and carry a `{message}` body.
pub const UPSTREAM_STATUS_HEADER: &str = "x-upstream-status";

/// Every route the API serves.
pub const ALL_ROUTES: [Route; 7] = [
    PROXY_FETCH,
    FEEDBACK_CREATE,
    HISTORY_LIST,
    HISTORY_CREATE,
    DOWNLOADS_LIST,
    DOWNLOADS_CREATE,
    DOWNLOADS_UPDATE,
];

/// Substitutes `:key` placeholders in `path` with the matching values.
/// Keys without a placeholder are ignored.
pub fn build_url(path: &str, params: &[(&str, &str)]) -> String {
    let mut url = path.to_string();
    for (key, value) in params {
        let placeholder = format!(":{}", key);
        if url.contains(&placeholder) {
            url = url.replace(&placeholder, value);
        }
    }
    url
}

/// The proxy address the content host loads for `location`.
pub fn proxy_url(location: &str) -> String {
    format!("{}?url={}", PROXY_FETCH.path, urlencoding::encode(location))
}
