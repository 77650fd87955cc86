// mydump-core/src/application/mod.rs

pub mod orchestrate;
pub mod resolve;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use mydump_core::application::{ConfigResolver, RunFlags, RunOrchestrator};`

pub use orchestrate::{RunOrchestrator, RunPhase, compose_file_pattern};
pub use resolve::{ConfigResolver, RunFlags};
