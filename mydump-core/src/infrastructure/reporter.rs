// mydump-core/src/infrastructure/reporter.rs

use crate::ports::Reporter;

/// Default reporter: every message becomes a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("❌ {}", message);
    }
}
