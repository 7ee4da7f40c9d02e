//! Remote API contract and client.
//!
//! - [`routes`]: the static route table (method + path) shared by the
//!   server router and the client.
//! - [`schema`]: request payloads, their validation, and response parsing.
//! - [`client`]: the reqwest-backed client that enforces the contract.

pub mod client;
pub mod routes;
pub mod schema;

pub use client::ApiClient;
pub use routes::{build_url, HttpMethod, Route};
pub use schema::{parse_input, parse_response, Validate};
