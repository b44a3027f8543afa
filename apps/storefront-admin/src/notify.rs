//! # Tracing Notifier
//!
//! The host's notification sink: every clamp notice is logged and kept so the
//! command can hand it back to the UI as a toast.

use storefront_core::{Notice, NoticeLog, Notifier, Severity};
use tracing::{info, warn};

/// Logs notices through `tracing` and buffers them for the command response.
#[derive(Debug, Default)]
pub struct TracingNotifier {
    log: NoticeLog,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notices collected so far.
    pub fn into_notices(self) -> Vec<Notice> {
        self.log.drain()
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => warn!(%message, "input clamped"),
            Severity::Info => info!(%message, "notice"),
        }
        self.log.notify(message, severity);
    }
}
