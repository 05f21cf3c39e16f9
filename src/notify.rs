//! Notifications
//!
//! User-visible toast messages. Every failure path in the fetch layer reports
//! once through a [`Notifier`]; the sink decides how it is shown.

use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A single toast message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, level: ToastLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.notify(ToastLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(ToastLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastLevel::Error, message);
    }
}

/// Shared notifier handle
pub type SharedNotifier = Arc<dyn Notifier>;

/// Emits toasts as tracing events under the `salesboard::toast` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Success | ToastLevel::Info => {
                tracing::info!(target: "salesboard::toast", level = ?level, "{}", message)
            }
            ToastLevel::Warning => tracing::warn!(target: "salesboard::toast", "{}", message),
            ToastLevel::Error => tracing::error!(target: "salesboard::toast", "{}", message),
        }
    }
}

/// Keeps every toast in memory, in emission order
///
/// Lets callers inspect exactly what a user would have been shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Messages only, for assertions
    pub fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(Toast {
                level,
                message: message.to_string(),
            });
        }
    }
}
