pub mod database;
pub mod error;
pub mod naming;
pub mod options;
pub mod patterns;

// Handy re-exports
pub use database::{normalize_database_list, require_database_list};
pub use error::DomainError;
pub use naming::DumpFilePattern;
pub use options::{ConnectionConfig, RunOptions};
pub use patterns::TablePatterns;
