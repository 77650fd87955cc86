// mydump-core/src/application/orchestrate.rs
//
// USE CASE: run exactly one dump from resolved options.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::domain::{DumpFilePattern, RunOptions};
use crate::error::MydumpError;
use crate::ports::{Connector, DumpEngine, DumpRequest, Reporter};

/// Lifecycle of a run, logged at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Connecting,
    Dumping,
    Succeeded,
    FailedCleanedUp,
    Closed,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunPhase::Connecting => "connecting",
            RunPhase::Dumping => "dumping",
            RunPhase::Succeeded => "succeeded",
            RunPhase::FailedCleanedUp => "failed-cleaned-up",
            RunPhase::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// `<label>-<database>-<timestamp layout>`, rendered by the engine.
pub fn compose_file_pattern(options: &RunOptions) -> DumpFilePattern {
    DumpFilePattern::new(options.conn_name(), options.database())
}

pub struct RunOrchestrator<'a, C, E> {
    connector: &'a C,
    engine: &'a E,
    reporter: &'a dyn Reporter,
}

impl<'a, C, E> RunOrchestrator<'a, C, E>
where
    C: Connector,
    E: DumpEngine<Handle = C::Handle>,
{
    pub fn new(connector: &'a C, engine: &'a E, reporter: &'a dyn Reporter) -> Self {
        Self {
            connector,
            engine,
            reporter,
        }
    }

    /// Runs the dump and returns the artifact path.
    ///
    /// A failed dump never leaves its output file behind, and the engine is
    /// closed once on every path that registered it.
    #[instrument(skip_all, fields(database = %options.database()))]
    pub async fn run(&self, options: RunOptions) -> Result<PathBuf, MydumpError> {
        let pattern = compose_file_pattern(&options);

        debug!(phase = %RunPhase::Connecting);
        let handle = self
            .connector
            .open(&options)
            .map_err(MydumpError::ConnectionSetup)?;

        let request = DumpRequest {
            output_dir: options.output_directory(),
            pattern: &pattern,
            structure_only: options.structure_only_tables(),
            ignored: options.ignored_tables(),
        };
        // The engine owns the handle from here on; a refused registration drops it.
        let mut dumper = self
            .engine
            .register(handle, request)
            .await
            .map_err(MydumpError::DumpRegistration)?;

        debug!(phase = %RunPhase::Dumping, file = ?dumper.output_file());
        let result = match dumper.dump().await {
            Ok(()) => {
                let path = dumper.output_file().to_path_buf();
                debug!(phase = %RunPhase::Succeeded);
                self.reporter
                    .info(&format!("File is saved to {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                self.reporter.error(&format!("Error dumping: {}", e));
                self.reporter.warn("Removing dump file");
                self.remove_partial(dumper.output_file());
                debug!(phase = %RunPhase::FailedCleanedUp);
                Err(MydumpError::DumpExecution(e))
            }
        };

        dumper.close().await;
        debug!(phase = %RunPhase::Closed);
        result
    }

    fn remove_partial(&self, path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = ?path, "Partial dump removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = ?path, error = %e, "Partial dump could not be removed");
                self.reporter.error(&format!(
                    "Could not remove partial dump {}: {}",
                    path.display(),
                    e
                ));
            }
        }
    }
}
