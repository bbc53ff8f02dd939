//! Debug side channel for pipeline progress messages.

use std::sync::Mutex;

/// Receives human-readable progress messages.
///
/// Passed explicitly to the functions that emit them, so callers decide
/// whether debug output goes anywhere at all.
pub trait DebugObserver: Send + Sync {
    fn debug(&self, message: &str);
}

/// Discards every message.
pub struct NoopObserver;

impl DebugObserver for NoopObserver {
    fn debug(&self, _message: &str) {}
}

/// Keeps every message in memory, in order.
#[derive(Default)]
pub struct RecordingObserver {
    messages: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl DebugObserver for RecordingObserver {
    fn debug(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
