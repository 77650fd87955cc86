// mydump-core/src/ports/reporter.rs

/// Human-readable console output, decoupled from formatting.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Reporter;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Info,
        Warn,
        Error,
    }

    /// Keeps every message in memory for assertions.
    #[derive(Default)]
    pub struct RecordingReporter {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingReporter {
        pub fn lines(&self) -> Vec<(Level, String)> {
            self.lines.lock().map(|l| l.clone()).unwrap_or_default()
        }

        pub fn contains(&self, level: Level, needle: &str) -> bool {
            self.lines()
                .iter()
                .any(|(l, msg)| *l == level && msg.contains(needle))
        }

        fn push(&self, level: Level, message: &str) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((level, message.to_string()));
            }
        }
    }

    impl Reporter for RecordingReporter {
        fn info(&self, message: &str) {
            self.push(Level::Info, message);
        }

        fn warn(&self, message: &str) {
            self.push(Level::Warn, message);
        }

        fn error(&self, message: &str) {
            self.push(Level::Error, message);
        }
    }
}
