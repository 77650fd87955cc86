// mydump-core/src/domain/options.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::domain::database::{database_names, require_database_list};
use crate::domain::error::DomainError;

// --- BUILT-IN DEFAULTS (shared by flags and connection files) ---

pub const DEFAULT_NAME: &str = "dump";
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:3306";
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "root";

/// Connection parameters read from the `-connection` YAML file.
///
/// Missing fields take the built-in defaults, never the flag values.
/// Keys other than these five are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub address: String,
    #[serde(deserialize_with = "scalar_string")]
    pub username: String,
    #[serde(deserialize_with = "scalar_string")]
    pub password: String,
    #[serde(deserialize_with = "scalar_string")]
    pub dbname: String,
}

/// Field names as they appear in the connection file.
pub const CONNECTION_FIELDS: [&str; 5] = ["name", "address", "username", "password", "dbname"];

// Unquoted integers (`password: 1234`) are common in hand-written files. The loader
// refuses any other non-string scalar before it gets here.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Integer(i)) => i.to_string(),
    })
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            dbname: String::new(),
        }
    }
}

/// Resolved, immutable configuration of a single run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunOptions {
    conn_name: String,
    address: String,
    user_name: String,
    #[serde(serialize_with = "redact")]
    password: String,
    database: String,
    ignored_tables: Vec<String>,
    structure_only_tables: Vec<String>,
    output_directory: PathBuf,
}

fn redact<S: Serializer>(password: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if password.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("********")
    }
}

impl RunOptions {
    /// Builds the options, normalizing the database list.
    ///
    /// Fails when no database name survives normalization.
    pub fn new(
        connection: ConnectionConfig,
        ignored_tables: Vec<String>,
        structure_only_tables: Vec<String>,
        output_directory: PathBuf,
    ) -> Result<Self, DomainError> {
        let database = require_database_list(&connection.dbname)?;

        Ok(Self {
            conn_name: connection.name,
            address: connection.address,
            user_name: connection.username,
            password: connection.password,
            database,
            ignored_tables,
            structure_only_tables,
            output_directory,
        })
    }

    pub fn conn_name(&self) -> &str {
        &self.conn_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Normalized, comma-separated database list.
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn databases(&self) -> Vec<&str> {
        database_names(&self.database)
    }

    pub fn ignored_tables(&self) -> &[String] {
        &self.ignored_tables
    }

    pub fn structure_only_tables(&self) -> &[String] {
        &self.structure_only_tables
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }
}
