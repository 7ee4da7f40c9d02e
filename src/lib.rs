//! tabshell — a tabbed browsing shell backed by a small HTTP API.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod api;
pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod server;
pub mod services;
pub mod types;
