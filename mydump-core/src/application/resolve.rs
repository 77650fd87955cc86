// mydump-core/src/application/resolve.rs
//
// USE CASE: turn flags (and an optional connection file) into RunOptions.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::options::{DEFAULT_ADDRESS, DEFAULT_NAME, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::domain::{ConnectionConfig, RunOptions, TablePatterns, require_database_list};
use crate::error::MydumpError;
use crate::infrastructure::config::{load_connection_config, load_pattern_file};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::Reporter;

/// Raw command-line values, defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFlags {
    pub connection: Option<PathBuf>,
    pub name: String,
    pub addr: String,
    pub user: String,
    pub pass: String,
    pub dbname: String,
    pub ignore: Option<PathBuf>,
    pub struct_only: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Default for RunFlags {
    fn default() -> Self {
        Self {
            connection: None,
            name: DEFAULT_NAME.to_string(),
            addr: DEFAULT_ADDRESS.to_string(),
            user: DEFAULT_USERNAME.to_string(),
            pass: DEFAULT_PASSWORD.to_string(),
            dbname: String::new(),
            ignore: None,
            struct_only: None,
            output: None,
        }
    }
}

pub struct ConfigResolver<'a> {
    reporter: &'a dyn Reporter,
    working_dir: Option<PathBuf>,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self {
            reporter,
            working_dir: None,
        }
    }

    /// Replaces the process working directory as the output fallback.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Precedence: a connection file replaces name/addr/user/pass/dbname as a
    /// whole. Fields it leaves out take the built-in defaults, not the flags.
    #[instrument(skip(self, flags), fields(connection = ?flags.connection))]
    pub fn resolve(&self, flags: RunFlags) -> Result<RunOptions, MydumpError> {
        let connection = match &flags.connection {
            Some(path) => {
                info!(path = ?path, "Connection file overrides connection flags");
                load_connection_config(path)?
            }
            None => ConnectionConfig {
                name: flags.name,
                address: flags.addr,
                username: flags.user,
                password: flags.pass,
                dbname: flags.dbname,
            },
        };

        let output_directory = self.output_directory(flags.output.as_deref())?;

        // Fail fast, before touching pattern files or the network.
        require_database_list(&connection.dbname)?;

        let ignored_tables = load_patterns(flags.ignore.as_deref())?;
        let structure_only_tables = load_patterns(flags.struct_only.as_deref())?;

        let options = RunOptions::new(
            connection,
            ignored_tables,
            structure_only_tables,
            output_directory,
        )?;

        self.report(&options);
        Ok(options)
    }

    fn output_directory(&self, requested: Option<&Path>) -> Result<PathBuf, MydumpError> {
        let dir = match (requested, &self.working_dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(cwd)) => cwd.clone(),
            (None, None) => std::env::current_dir()?,
        };

        let resolved = dir.canonicalize().map_err(|e| {
            InfrastructureError::ConfigError(format!("output directory {:?}: {}", dir, e))
        })?;
        if !resolved.is_dir() {
            return Err(InfrastructureError::ConfigError(format!(
                "output directory {:?} is not a directory",
                resolved
            ))
            .into());
        }
        Ok(resolved)
    }

    fn report(&self, options: &RunOptions) {
        self.reporter.info("Running with parameters");
        match serde_json::to_string_pretty(options) {
            Ok(pretty) => self.reporter.info(&pretty),
            Err(e) => self
                .reporter
                .warn(&format!("Cannot render parameters: {}", e)),
        }
        self.reporter.info(&format!(
            "Running on operating system : {}",
            std::env::consts::OS
        ));
    }
}

/// Loads and validates one pattern file. No file means no patterns.
fn load_patterns(path: Option<&Path>) -> Result<Vec<String>, MydumpError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let lines = load_pattern_file(path)?;
    TablePatterns::compile(&lines)?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::ports::reporter::testing::{Level, RecordingReporter};
    use anyhow::Result;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn flags(dbname: &str) -> RunFlags {
        RunFlags {
            dbname: dbname.to_string(),
            ..RunFlags::default()
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn test_flags_with_defaults() -> Result<()> {
        let dir = tempdir()?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let opts = resolver.resolve(flags("shop , crm"))?;
        assert_eq!(opts.conn_name(), "dump");
        assert_eq!(opts.address(), "127.0.0.1:3306");
        assert_eq!(opts.user_name(), "root");
        assert_eq!(opts.password(), "root");
        assert_eq!(opts.database(), "shop,crm");
        assert!(opts.ignored_tables().is_empty());
        assert!(opts.structure_only_tables().is_empty());
        assert_eq!(opts.output_directory(), dir.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn test_connection_file_fully_overrides_flags() -> Result<()> {
        let dir = tempdir()?;
        let conn = write(&dir, "conn.yaml", "address: db:3307\ndbname: prod\n")?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let opts = resolver.resolve(RunFlags {
            connection: Some(conn),
            name: "nightly".into(),
            addr: "10.0.0.1:3306".into(),
            user: "admin".into(),
            pass: "secret".into(),
            dbname: "from_flag".into(),
            ..RunFlags::default()
        })?;

        assert_eq!(opts.address(), "db:3307");
        assert_eq!(opts.database(), "prod");
        // Left out of the file: built-in defaults, not the flags.
        assert_eq!(opts.conn_name(), "dump");
        assert_eq!(opts.user_name(), "root");
        assert_eq!(opts.password(), "root");
        Ok(())
    }

    #[test]
    fn test_connection_file_without_dbname_ignores_flag() -> Result<()> {
        let dir = tempdir()?;
        let conn = write(&dir, "conn.yaml", "username: backup\n")?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let res = resolver.resolve(RunFlags {
            connection: Some(conn),
            ..flags("shop")
        });
        assert!(matches!(
            res,
            Err(MydumpError::Domain(DomainError::EmptyDatabaseName))
        ));
        Ok(())
    }

    #[test]
    fn test_empty_database_fails_before_pattern_files() -> Result<()> {
        let dir = tempdir()?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let res = resolver.resolve(RunFlags {
            ignore: Some(dir.path().join("missing.txt")),
            ..flags("  ")
        });
        assert!(matches!(
            res,
            Err(MydumpError::Domain(DomainError::EmptyDatabaseName))
        ));
        assert!(reporter.lines().is_empty());
        Ok(())
    }

    #[test]
    fn test_pattern_files_keep_order() -> Result<()> {
        let dir = tempdir()?;
        let ignore = write(&dir, "ignore.txt", "sessions\nlog_.*\ncache\n")?;
        let structure = write(&dir, "struct.txt", "orders\n\naudit\n")?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let opts = resolver.resolve(RunFlags {
            ignore: Some(ignore),
            struct_only: Some(structure),
            ..flags("shop")
        })?;

        assert_eq!(opts.ignored_tables(), ["sessions", "log_.*", "cache"]);
        assert_eq!(opts.structure_only_tables(), ["orders", "", "audit"]);
        Ok(())
    }

    #[test]
    fn test_missing_pattern_file() -> Result<()> {
        let dir = tempdir()?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let res = resolver.resolve(RunFlags {
            struct_only: Some(dir.path().join("nope.txt")),
            ..flags("shop")
        });
        assert!(matches!(
            res,
            Err(MydumpError::Infrastructure(InfrastructureError::PatternFile { .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let ignore = write(&dir, "ignore.txt", "ok\nbad[(\n")?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        let res = resolver.resolve(RunFlags {
            ignore: Some(ignore),
            ..flags("shop")
        });
        assert!(matches!(
            res,
            Err(MydumpError::Domain(DomainError::InvalidTablePattern { .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_output_directory() -> Result<()> {
        let dir = tempdir()?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter);

        let res = resolver.resolve(RunFlags {
            output: Some(dir.path().join("does/not/exist")),
            ..flags("shop")
        });
        assert!(matches!(
            res,
            Err(MydumpError::Infrastructure(InfrastructureError::ConfigError(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_explicit_output_directory_wins() -> Result<()> {
        let cwd = tempdir()?;
        let out = tempdir()?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(cwd.path());

        let opts = resolver.resolve(RunFlags {
            output: Some(out.path().to_path_buf()),
            ..flags("shop")
        })?;
        assert_eq!(opts.output_directory(), out.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn test_reports_parameters_and_platform() -> Result<()> {
        let dir = tempdir()?;
        let reporter = RecordingReporter::default();
        let resolver = ConfigResolver::new(&reporter).with_working_dir(dir.path());

        resolver.resolve(RunFlags {
            pass: "hunter2".into(),
            ..flags("shop")
        })?;

        assert!(reporter.contains(Level::Info, "Running with parameters"));
        assert!(reporter.contains(Level::Info, "\"Database\": \"shop\""));
        assert!(reporter.contains(Level::Info, std::env::consts::OS));
        assert!(
            !reporter
                .lines()
                .iter()
                .any(|(_, msg)| msg.contains("hunter2"))
        );
        Ok(())
    }
}
