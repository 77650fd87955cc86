// mydump/src/commands/dump.rs
//
// USE CASE: resolve the configuration, then run one dump.

use std::path::PathBuf;

use mydump_core::MydumpError;
use mydump_core::application::{ConfigResolver, RunOrchestrator};
use mydump_core::infrastructure::adapters::{MySqlConnector, MysqldumpEngine};
use mydump_core::ports::Reporter;

use crate::cli::Cli;

pub async fn execute(cli: Cli, reporter: &dyn Reporter) -> Result<PathBuf, MydumpError> {
    let engine = MysqldumpEngine::new(cli.mysqldump.clone());

    // A. Configuring (no network yet)
    let options = ConfigResolver::new(reporter).resolve(cli.into_flags())?;

    // B. Connecting + Dumping
    let connector = MySqlConnector::default();
    RunOrchestrator::new(&connector, &engine, reporter)
        .run(options)
        .await
}
