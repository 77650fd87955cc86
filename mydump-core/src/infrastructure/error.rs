// mydump-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE ---
    #[error("MySQL Error: {0}")]
    #[diagnostic(
        code(mydump::infra::database),
        help("The server may be unreachable or the credentials rejected.")
    )]
    Database(#[from] sqlx::Error),

    #[error("Invalid database address '{address}': {reason}")]
    #[diagnostic(code(mydump::infra::address))]
    InvalidAddress { address: String, reason: String },

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(mydump::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in {path:?}: {source}")]
    #[diagnostic(
        code(mydump::infra::yaml),
        help("Expected string fields: name, address, username, password, dbname.")
    )]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(mydump::infra::config))]
    ConfigError(String),

    #[error("Connection file not found at '{0}'")]
    #[diagnostic(code(mydump::infra::config_missing))]
    ConfigNotFound(PathBuf),

    #[error("Cannot read table pattern file {path:?}: {source}")]
    #[diagnostic(code(mydump::infra::pattern_file))]
    PatternFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- DUMP ENGINE ---
    #[error("Output file {0:?} already exists")]
    #[diagnostic(code(mydump::infra::artifact_exists))]
    ArtifactExists(PathBuf),

    #[error("Failed to launch '{program}': {source}")]
    #[diagnostic(
        code(mydump::infra::spawn),
        help("Install the MySQL client tools or point -mysqldump at the binary.")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    #[diagnostic(code(mydump::infra::dump_process))]
    DumpProcess {
        program: String,
        status: String,
        stderr: String,
    },
}
