// mydump/src/commands/mod.rs

pub mod dump;
