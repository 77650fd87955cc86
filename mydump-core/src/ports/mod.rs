// mydump-core/src/ports/mod.rs

pub mod connector;
pub mod dump_engine;
pub mod reporter;

pub use connector::Connector;
pub use dump_engine::{DumpEngine, DumpRequest, Dumper};
pub use reporter::Reporter;
