// mydump-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Database name can't be empty")]
    #[diagnostic(
        code(mydump::domain::empty_database),
        help("Pass -dbname or set 'dbname' in the -connection file.")
    )]
    EmptyDatabaseName,

    #[error("Invalid table pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(mydump::domain::table_pattern),
        help("Each line of -ignore / -structOnly files is a table name or a regular expression.")
    )]
    InvalidTablePattern { pattern: String, reason: String },
}
