// mydump-core/src/infrastructure/adapters/mysql.rs

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::domain::RunOptions;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::Connector;

pub const DEFAULT_PORT: u16 = 3306;

/// Where and as whom the dump runs. Shared by the pool and the mysqldump process.
#[derive(Clone, PartialEq, Eq)]
pub struct MySqlTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub databases: Vec<String>,
}

impl fmt::Debug for MySqlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("databases", &self.databases)
            .finish()
    }
}

/// Lazy connection handle. No socket is opened until the first query.
#[derive(Debug)]
pub struct MySqlHandle {
    pub pool: MySqlPool,
    pub target: MySqlTarget,
}

impl MySqlHandle {
    pub async fn list_tables(&self, database: &str) -> Result<Vec<String>, InfrastructureError> {
        let tables = sqlx::query_scalar::<_, String>(
            "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.TABLES \
             WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME",
        )
        .bind(database)
        .fetch_all(&self.pool)
        .await?;

        debug!(database, count = tables.len(), "Tables listed");
        Ok(tables)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

pub struct MySqlConnector {
    acquire_timeout: Duration,
}

impl Default for MySqlConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl MySqlConnector {
    pub fn new(acquire_timeout: Duration) -> Self {
        Self { acquire_timeout }
    }
}

impl Connector for MySqlConnector {
    type Handle = MySqlHandle;

    fn open(&self, options: &RunOptions) -> Result<MySqlHandle, InfrastructureError> {
        let (host, port) = parse_address(options.address())?;
        let databases: Vec<String> = options.databases().into_iter().map(String::from).collect();

        let mut connect = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .username(options.user_name())
            .password(options.password());

        // A multi-database run queries information_schema with explicit schema names.
        if let [single] = databases.as_slice() {
            connect = connect.database(single);
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(self.acquire_timeout)
            .connect_lazy_with(connect);

        Ok(MySqlHandle {
            pool,
            target: MySqlTarget {
                host,
                port,
                username: options.user_name().to_string(),
                password: options.password().to_string(),
                databases,
            },
        })
    }
}

/// Splits `host:port`, `host` or `[v6]:port`. A missing port means 3306.
pub fn parse_address(address: &str) -> Result<(String, u16), InfrastructureError> {
    let invalid = |reason: &str| InfrastructureError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    };

    let address = address.trim();
    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(|| invalid("unclosed '['"))?;
        match tail {
            "" => (host, None),
            _ => (
                host,
                Some(tail.strip_prefix(':').ok_or_else(|| invalid("expected ':' after ']'"))?),
            ),
        }
    } else {
        match address.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (address, None),
        }
    };

    if host.is_empty() {
        return Err(invalid("missing host"));
    }

    let port = match port {
        None => DEFAULT_PORT,
        Some(p) => p
            .parse::<u16>()
            .map_err(|_| invalid("port must be a number between 0 and 65535"))?,
    };

    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionConfig;
    use anyhow::Result;
    use std::path::PathBuf;

    fn options(address: &str, dbname: &str) -> Result<RunOptions> {
        let connection = ConnectionConfig {
            address: address.to_string(),
            dbname: dbname.to_string(),
            ..ConnectionConfig::default()
        };
        Ok(RunOptions::new(connection, vec![], vec![], PathBuf::from("/tmp"))?)
    }

    #[test]
    fn test_parse_address_variants() -> Result<()> {
        assert_eq!(parse_address("127.0.0.1:3306")?, ("127.0.0.1".to_string(), 3306));
        assert_eq!(parse_address("db.internal")?, ("db.internal".to_string(), 3306));
        assert_eq!(parse_address("[::1]:3307")?, ("::1".to_string(), 3307));
        assert_eq!(parse_address("[::1]")?, ("::1".to_string(), 3306));
        Ok(())
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        for bad in [":3306", "host:abc", "host:99999", "[::1", "[::1]x", "a:b:c"] {
            assert!(
                matches!(parse_address(bad), Err(InfrastructureError::InvalidAddress { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_open_is_lazy() -> Result<()> {
        // Nothing listens on port 1: opening must still succeed.
        let handle = MySqlConnector::default().open(&options("127.0.0.1:1", "a, b")?)?;
        assert_eq!(handle.target.port, 1);
        assert_eq!(handle.target.databases, vec!["a", "b"]);
        handle.close().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_open_rejects_malformed_address() -> Result<()> {
        let res = MySqlConnector::default().open(&options("localhost:port", "shop")?);
        assert!(matches!(res, Err(InfrastructureError::InvalidAddress { .. })));
        Ok(())
    }

    #[test]
    fn test_debug_hides_password() {
        let target = MySqlTarget {
            host: "h".into(),
            port: 1,
            username: "u".into(),
            password: "hunter2".into(),
            databases: vec![],
        };
        assert!(!format!("{target:?}").contains("hunter2"));
    }
}
