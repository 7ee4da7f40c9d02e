// tabshell shared type definitions
// Each submodule defines types used across the shell, the API client and the server.

pub mod download;
pub mod errors;
pub mod feedback;
pub mod history;
pub mod notification;
pub mod settings;
pub mod tab;
