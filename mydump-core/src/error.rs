// mydump-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum MydumpError {
    // --- DOMAIN ERRORS (validation of resolved options) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (config files, IO, YAML) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- RUN ERRORS ---
    #[error("Error opening database: {0}")]
    #[diagnostic(
        code(mydump::run::connection_setup),
        help("Check the -addr value, it must look like host:port.")
    )]
    ConnectionSetup(#[source] InfrastructureError),

    #[error("Error registering database: {0}")]
    #[diagnostic(code(mydump::run::registration))]
    DumpRegistration(#[source] InfrastructureError),

    #[error("Error dumping: {0}")]
    #[diagnostic(code(mydump::run::execution))]
    DumpExecution(#[source] InfrastructureError),
}

impl From<std::io::Error> for MydumpError {
    fn from(err: std::io::Error) -> Self {
        MydumpError::Infrastructure(InfrastructureError::Io(err))
    }
}
