// mydump-core/src/ports/dump_engine.rs

use async_trait::async_trait;
use std::path::Path;

use crate::domain::DumpFilePattern;
use crate::infrastructure::error::InfrastructureError;

/// Everything the engine needs besides the connection handle.
#[derive(Debug, Clone, Copy)]
pub struct DumpRequest<'a> {
    pub output_dir: &'a Path,
    pub pattern: &'a DumpFilePattern,
    pub structure_only: &'a [String],
    pub ignored: &'a [String],
}

#[async_trait]
pub trait DumpEngine: Send + Sync {
    type Handle: Send + 'static;

    /// Takes ownership of the handle. On failure the handle is dropped and no
    /// output file exists.
    async fn register(
        &self,
        handle: Self::Handle,
        request: DumpRequest<'_>,
    ) -> Result<Box<dyn Dumper>, InfrastructureError>;
}

/// A registered dump, bound to one output file.
#[async_trait]
pub trait Dumper: Send {
    async fn dump(&mut self) -> Result<(), InfrastructureError>;

    /// Location of the artifact being written.
    fn output_file(&self) -> &Path;

    /// Releases the output file handle and the database connection.
    async fn close(self: Box<Self>);
}
