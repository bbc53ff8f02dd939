//! Debug observer that forwards to `tracing`.

use el_core::DebugObserver;

/// Emits every progress message as a `tracing` debug event.
pub struct TracingObserver;

impl DebugObserver for TracingObserver {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }
}
