// mydump-core/src/infrastructure/adapters/mod.rs

pub mod mysql;
pub mod mysqldump;

pub use mysql::{MySqlConnector, MySqlHandle, MySqlTarget};
pub use mysqldump::MysqldumpEngine;
