// mydump-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for the database connector, the dump engine and the console reporter.
pub mod ports;

// 2. Domain
// Run options, database-list normalization, artifact naming, table patterns.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML/pattern file loaders, sqlx MySQL connector, mysqldump engine, tracing reporter.
pub mod infrastructure;

// 4. Application (Use Cases)
// ConfigResolver and RunOrchestrator.
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::MydumpError;
