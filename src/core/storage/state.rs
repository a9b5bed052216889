use sqlx::{
    Sqlite, SqliteConnection,
    pool::PoolConnection,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::debug;

use std::{
    fs,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use crate::core::storage::KeyValueStorage;
use crate::error::StorageError;

/// Key-value storage backed by a single SQLite file.
pub struct SqliteStorage {
    db_file: PathBuf,
    pool: RwLock<SqlitePool>,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("db_file", &self.db_file)
            .finish()
    }
}

fn connect_options(db_file: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(db_file)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
}

impl SqliteStorage {
    pub async fn new<P: AsRef<Path>>(db_file: P) -> Result<Self, StorageError> {
        let db_file = db_file.as_ref().to_path_buf();
        if let Some(parent) = db_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options(&db_file))
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        debug!(db_file = %db_file.display(), "opened key-value storage");

        Ok(Self {
            db_file,
            pool: RwLock::new(pool),
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_file
    }

    /// Checks out a connection. The pool cannot be closed while the guard lives.
    pub async fn conn(&self) -> Result<ConnGuard<'_>, StorageError> {
        let pool = self.pool.read().await;
        let conn = pool.acquire().await?;
        Ok(ConnGuard { _pool: pool, conn })
    }

    /// Waits for in-flight queries, checkpoints the WAL and closes the pool.
    /// Any later access fails until the storage is reopened.
    pub async fn close(&self) -> Result<(), StorageError> {
        let pool_guard = self.pool.write().await;
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE);")
            .execute(&*pool_guard)
            .await?;
        pool_guard.close().await;
        Ok(())
    }
}

impl KeyValueStorage for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.conn().await?;
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.conn().await?;
        sqlx::query(
            r#"INSERT INTO kv_storage (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value"#,
        )
        .bind(key)
        .bind(value)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.conn().await?;
        sqlx::query("DELETE FROM kv_storage WHERE key = ?")
            .bind(key)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

/// A pooled connection that also holds the pool's read lock.
pub struct ConnGuard<'a> {
    _pool: RwLockReadGuard<'a, SqlitePool>,
    conn: PoolConnection<Sqlite>,
}

impl Deref for ConnGuard<'_> {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &self.conn
    }
}

impl DerefMut for ConnGuard<'_> {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
