//! Notification center: the single user-facing channel for remote errors
//! and confirmations.

use std::collections::VecDeque;

use crate::types::errors::ApiError;
use crate::types::notification::{Toast, ToastVariant};

/// Queue of pending toasts, oldest first.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    queue: VecDeque<Toast>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: &str, description: &str, variant: ToastVariant) {
        self.queue.push_back(Toast {
            title: title.to_string(),
            description: description.to_string(),
            variant,
        });
    }

    pub fn success(&mut self, title: &str, description: &str) {
        self.push(title, description, ToastVariant::Default);
    }

    pub fn report_error(&mut self, err: &ApiError) {
        tracing::debug!(error = %err, "surfacing error notification");
        self.push("Error", &err.user_message(), ToastVariant::Destructive);
    }

    /// Converts a failed result into a toast and hands back the value otherwise.
    pub fn report<T>(&mut self, result: Result<T, ApiError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report_error(&err);
                None
            }
        }
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
