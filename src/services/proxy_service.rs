//! Upstream fetching for the same-origin proxy route.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::api::schema::validate_proxy_target;
use crate::types::errors::ProxyError;
use crate::types::settings::ProxySettings;

const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Upstream response relayed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedPage {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Fetches remote pages on behalf of the shell.
pub struct ProxyService {
    http: Client,
    settings: ProxySettings,
}

impl ProxyService {
    pub fn new(settings: ProxySettings) -> Result<Self, ProxyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;
        Ok(Self { http, settings })
    }

    /// Fetches `raw_target`, which must be an absolute http(s) address.
    pub async fn fetch(&self, raw_target: &str) -> Result<ProxiedPage, ProxyError> {
        let target = validate_proxy_target(raw_target)?;
        let limit = self.settings.max_body_bytes;

        let response = self
            .http
            .get(target)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;

        if response.content_length().is_some_and(|len| len as usize > limit) {
            return Err(ProxyError::TooLarge(limit));
        }

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;
        if bytes.len() > limit {
            return Err(ProxyError::TooLarge(limit));
        }

        let body = if self.settings.inject_base_href && content_type.starts_with("text/html") {
            inject_base_href(&bytes, &final_url)
        } else {
            bytes.to_vec()
        };

        tracing::info!(upstream = %final_url, status, bytes = body.len(), "proxied upstream content");
        Ok(ProxiedPage {
            status,
            content_type,
            body,
        })
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Inserts `<base href>` right after the `<head>` tag so relative links
/// resolve against the upstream address. Documents that already declare a
/// base are returned unchanged; documents without a head get it prepended.
///
/// Works on raw bytes: the document keeps whatever charset it was served in.
pub fn inject_base_href(html: &[u8], base: &str) -> Vec<u8> {
    let lower = html.to_ascii_lowercase();
    if find_bytes(&lower, b"<base").is_some() {
        return html.to_vec();
    }
    let tag = format!("<base href=\"{}\">", base.replace('"', "&quot;"));

    let mut search_from = 0;
    while let Some(found) = find_bytes(&lower[search_from..], b"<head") {
        let start = search_from + found;
        let after = start + b"<head".len();
        let boundary = lower.get(after).copied();
        if matches!(boundary, Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            if let Some(close) = lower[after..].iter().position(|&b| b == b'>') {
                let at = after + close + 1;
                return [&html[..at], tag.as_bytes(), &html[at..]].concat();
            }
        }
        search_from = after;
    }
    [tag.as_bytes(), html].concat()
}
