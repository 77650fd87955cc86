// mydump-core/src/ports/connector.rs

// What the orchestrator needs from a database driver: a handle built from the
// resolved options. Building it must not touch the network; connectivity is
// checked when the dump engine first uses the handle.

use crate::domain::RunOptions;
use crate::infrastructure::error::InfrastructureError;

pub trait Connector: Send + Sync {
    type Handle: Send + 'static;

    fn open(&self, options: &RunOptions) -> Result<Self::Handle, InfrastructureError>;
}
