use std::sync::OnceLock;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{config::Config, errors::Result};

pub mod prompts;
pub mod schema;

static DB_POOL: OnceLock<SqlitePool> = OnceLock::new();

pub struct Db;

impl Db {
    /// Open a connection pool for `config` and apply the schema
    ///
    /// The parent directory of the database file is created if needed.
    pub async fn open(config: &Config) -> Result<SqlitePool> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(&config.db_path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(config.busy_timeout),
            )
            .await?;

        for statement in schema::statements() {
            sqlx::query(statement).execute(&pool).await?;
        }

        tracing::info!(path = %config.db_path.display(), "prompt database ready");
        Ok(pool)
    }

    /// Initialize the global connection pool used by the command layer
    pub async fn init(config: &Config) -> Result<()> {
        if DB_POOL.get().is_some() {
            return Ok(());
        }

        let pool = Self::open(config).await?;

        if DB_POOL.set(pool).is_err() {
            // Lost an init race; the winner's pool is used.
            tracing::debug!("global database pool already initialized");
        }

        Ok(())
    }

    /// Get a reference to the global connection pool
    pub fn pool() -> Result<&'static SqlitePool> {
        DB_POOL
            .get()
            .ok_or_else(|| anyhow::anyhow!("Database not initialized").into())
    }
}
