use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::{Assignment, Device, User};
use crate::database::repository::Repository;
use crate::database::schema::Entity;

/// Errors from the store and its repositories
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Malformed stored record: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return DatabaseError::UniqueViolation(message),
                ErrorKind::ForeignKeyViolation => return DatabaseError::ForeignKeyViolation(message),
                _ => {}
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Handle to the inventory database. Cheap to clone; every clone shares the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if needed) the database named by `config.url`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(config.url.clone()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        if is_in_memory(&config.url) {
            // Every in-memory connection is its own database; keep exactly one alive
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            if let Some(parent) = database_file(&config.url).and_then(Path::parent) {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            pool_options = pool_options.max_connections(config.max_connections);
        }

        let pool = pool_options.connect_with(options).await?;
        info!("Opened database pool for: {}", config.url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables. With `force`, existing tables and their rows are
    /// dropped first.
    pub async fn migrate(&self, force: bool) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        if force {
            for entity in Entity::ALL.iter().rev() {
                let sql = format!("DROP TABLE IF EXISTS \"{}\"", entity.table());
                sqlx::query(&sql).execute(&mut *tx).await?;
            }
        }
        for entity in Entity::ALL {
            sqlx::query(entity.create_table_sql()).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Database schema ready (force={})", force);
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    pub fn devices(&self) -> Repository<Device> {
        Repository::new(self.pool.clone())
    }

    pub fn users(&self) -> Repository<User> {
        Repository::new(self.pool.clone())
    }

    pub fn assignments(&self) -> Repository<Assignment> {
        Repository::new(self.pool.clone())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// File path part of a `sqlite:` URL, without the query string
fn database_file(url: &str) -> Option<&Path> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() {
        None
    } else {
        Some(Path::new(path))
    }
}
