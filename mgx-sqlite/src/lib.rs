#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::time::Duration;
use tokio::try_join;

pub mod config;
mod error;
mod r#impl;
pub mod types;

pub use error::Error;

use config::SqliteConfig;

/// SQLite database implementation of the exchange repositories.
///
/// This struct provides separate reader and writer connection pools,
/// implementing all the repository traits defined in `mgx-core`. The reader
/// pool allows concurrent queries; the writer pool is capped at a single
/// connection, which (together with one transaction per pass) gives the
/// trading cycle the mutual-exclusion boundary it requires: no two passes
/// can interleave, and no reader ever observes a half-settled cycle.
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates the database if it does not exist (and `create_if_missing`
    /// is set) and applies any pending migrations before returning.
    ///
    /// The connection is configured with WAL journaling and a busy timeout,
    /// which is what lets the reader pool stay open while the single writer
    /// holds a cycle transaction.
    pub async fn open(config: &SqliteConfig) -> Result<Self, Error> {
        // An anonymous `:memory:` database is per-connection, which would
        // give the reader and writer pools two different databases. A
        // named, shared-cache memory database keeps every connection on
        // the same data while staying unique per `open` call.
        let options = match &config.database_path {
            Some(path) => sqlite::SqliteConnectOptions::new().filename(path),
            None => sqlite::SqliteConnectOptions::new().filename(format!(
                "file:mgx-{}?mode=memory&cache=shared",
                uuid::Uuid::new_v4().simple()
            )),
        };

        let options = options
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .journal_mode(sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlite::SqliteSynchronous::Normal)
            .pragma("temp_store", "memory")
            .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        // Run any pending migrations before handing the pools out.
        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}
