//! # Notifications
//!
//! The validator never renders anything. It hands a [`Notice`] to whatever
//! [`Notifier`] the host plugged in (a toast queue, a log, a test buffer).

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How loud a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
}

/// A user-facing advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

/// Sink for advisory notices.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Buffers notices in memory, in emission order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything collected so far, leaving the log empty.
    pub fn drain(&self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, message: &str, severity: Severity) {
        self.notices.borrow_mut().push(Notice {
            message: message.to_string(),
            severity,
        });
    }
}

// =============================================================================
// Checked Value
// =============================================================================

/// An accepted input value, possibly clamped, plus the notice explaining
/// the clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub notice: Option<Notice>,
}

impl<T> Checked<T> {
    /// Value accepted as-is.
    pub fn accepted(value: T) -> Self {
        Checked {
            value,
            notice: None,
        }
    }

    /// Value replaced by a boundary, with an error-severity notice.
    pub fn clamped(value: T, message: impl Into<String>) -> Self {
        Checked {
            value,
            notice: Some(Notice::error(message)),
        }
    }

    pub fn was_clamped(&self) -> bool {
        self.notice.is_some()
    }

    /// Forwards the notice (if any) to `sink` and returns the value.
    pub fn emit(self, sink: &dyn Notifier) -> T {
        if let Some(notice) = &self.notice {
            sink.notify(&notice.message, notice.severity);
        }
        self.value
    }
}
