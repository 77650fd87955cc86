// mydump-core/src/infrastructure/adapters/mysqldump.rs

use async_trait::async_trait;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::domain::TablePatterns;
use crate::domain::naming::SQL_EXTENSION;
use crate::infrastructure::adapters::mysql::{MySqlHandle, MySqlTarget};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{DumpEngine, DumpRequest, Dumper};

pub const DEFAULT_PROGRAM: &str = "mysqldump";

/// Dump engine driving the `mysqldump` client binary.
pub struct MysqldumpEngine {
    program: String,
}

impl Default for MysqldumpEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl MysqldumpEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl DumpEngine for MysqldumpEngine {
    type Handle = MySqlHandle;

    #[instrument(skip(self, handle, request), fields(pattern = %request.pattern))]
    async fn register(
        &self,
        handle: MySqlHandle,
        request: DumpRequest<'_>,
    ) -> Result<Box<dyn Dumper>, InfrastructureError> {
        let invalid = |e: crate::domain::DomainError| InfrastructureError::ConfigError(e.to_string());
        let ignored = TablePatterns::compile(request.ignored).map_err(invalid)?;
        let structure_only = TablePatterns::compile(request.structure_only).map_err(invalid)?;

        // Created last: nothing above leaves a file behind.
        let file_name = request.pattern.render(&Local::now(), SQL_EXTENSION);
        let path = request.output_dir.join(file_name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => InfrastructureError::ArtifactExists(path.clone()),
                _ => InfrastructureError::Io(e),
            })?;

        debug!(path = ?path, "Output file created");

        Ok(Box::new(MysqldumpDumper {
            program: self.program.clone(),
            handle,
            path,
            file,
            ignored,
            structure_only,
        }))
    }
}

/// Split of one database's tables.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TablePlan {
    /// Left out of the data dump (ignored + structure-only).
    pub excluded: Vec<String>,
    /// Dumped again with `--no-data`.
    pub structure_only: Vec<String>,
}

impl TablePlan {
    /// Ignored wins when a table matches both lists.
    pub fn classify(tables: &[String], ignored: &TablePatterns, structure_only: &TablePatterns) -> Self {
        let mut plan = TablePlan::default();
        for table in tables {
            if ignored.matches(table) {
                plan.excluded.push(table.clone());
            } else if structure_only.matches(table) {
                plan.excluded.push(table.clone());
                plan.structure_only.push(table.clone());
            }
        }
        plan
    }
}

pub struct MysqldumpDumper {
    program: String,
    handle: MySqlHandle,
    path: PathBuf,
    file: File,
    ignored: TablePatterns,
    structure_only: TablePatterns,
}

impl MysqldumpDumper {
    async fn run(&self, args: Vec<String>) -> Result<(), InfrastructureError> {
        let stdout = self.file.try_clone()?;
        debug!(program = %self.program, ?args, "Running dump process");

        // `output()` would re-pipe stdout, so spawn and wait instead.
        let child = Command::new(&self.program)
            .args(&args)
            // Keeps the password off the process list.
            .env("MYSQL_PWD", &self.handle.target.password)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| InfrastructureError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(InfrastructureError::DumpProcess {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Dumper for MysqldumpDumper {
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn dump(&mut self) -> Result<(), InfrastructureError> {
        for database in self.handle.target.databases.clone() {
            let tables = self.handle.list_tables(&database).await?;
            let plan = TablePlan::classify(&tables, &self.ignored, &self.structure_only);
            info!(
                database = %database,
                tables = tables.len(),
                excluded = plan.excluded.len(),
                structure_only = plan.structure_only.len(),
                "Dumping database"
            );

            self.run(full_dump_args(&self.handle.target, &database, &plan.excluded))
                .await?;

            if !plan.structure_only.is_empty() {
                self.run(structure_dump_args(
                    &self.handle.target,
                    &database,
                    &plan.structure_only,
                ))
                .await?;
            }
        }
        Ok(())
    }

    fn output_file(&self) -> &Path {
        &self.path
    }

    async fn close(self: Box<Self>) {
        let MysqldumpDumper { handle, file, .. } = *self;
        drop(file);
        handle.close().await;
        debug!("Dump engine closed");
    }
}

fn connection_args(target: &MySqlTarget) -> Vec<String> {
    vec![
        format!("--host={}", target.host),
        format!("--port={}", target.port),
        format!("--user={}", target.username),
        "--protocol=TCP".to_string(),
    ]
}

/// Schema + rows for every table not excluded. `--databases` adds the
/// `CREATE DATABASE`/`USE` statements the structure-only pass relies on.
pub fn full_dump_args(target: &MySqlTarget, database: &str, excluded: &[String]) -> Vec<String> {
    let mut args = connection_args(target);
    args.extend(
        excluded
            .iter()
            .map(|table| format!("--ignore-table={}.{}", database, table)),
    );
    args.push("--databases".to_string());
    args.push(database.to_string());
    args
}

pub fn structure_dump_args(target: &MySqlTarget, database: &str, tables: &[String]) -> Vec<String> {
    let mut args = connection_args(target);
    args.push("--no-data".to_string());
    args.push(database.to_string());
    args.extend(tables.iter().cloned());
    args
}
