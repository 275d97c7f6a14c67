//! SQLite-based metadata cache.
//!
//! Provides persistent caching of crawled schemas so the web layer can
//! serve repeated crawl requests without re-introspecting. The cache is
//! stored in `~/.schemer/cache.db`. The introspector itself never touches
//! it; callers decide when a cached crawl is acceptable.
//!
//! # Design
//!
//! - Simple key-value store with JSON values
//! - No TTL - cache persists until manually cleared
//! - Versioned - auto-clears on version mismatch
//!
//! # Key Format
//!
//! ```text
//! {conn_hash}:crawl:{schema_pattern}   -> [TableSchema, ...]
//! ```

mod hash;
pub use hash::{compute_hash, connection_hash};

use std::path::PathBuf;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::metadata::TableSchema;

/// Current cache schema version. Bump this when the cache format changes.
const CACHE_VERSION: i32 = 1;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to determine cache directory")]
    NoCacheDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// SQLite-based metadata cache.
pub struct MetadataCache {
    conn: Connection,
}

impl MetadataCache {
    /// Open or create the cache database.
    ///
    /// The cache is stored at `~/.schemer/cache.db`.
    /// If the cache version doesn't match, it's automatically cleared.
    pub fn open() -> CacheResult<Self> {
        let path = Self::cache_path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let cache = Self { conn };
        cache.init()?;

        Ok(cache)
    }

    /// Open an in-memory cache (for testing).
    pub fn open_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.init()?;
        Ok(cache)
    }

    /// Get the path to the cache database.
    pub fn cache_path() -> CacheResult<PathBuf> {
        let base = dirs::home_dir().ok_or(CacheError::NoCacheDir)?;
        Ok(base.join(".schemer").join("cache.db"))
    }

    /// Initialize the cache schema and check version.
    fn init(&self) -> CacheResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS cache (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        // Check version
        let stored_version: Option<i32> = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
                let s: String = row.get(0)?;
                Ok(s.parse().unwrap_or(0))
            })
            .optional()?;

        match stored_version {
            Some(v) if v == CACHE_VERSION => {
                // Version matches, cache is valid
            }
            Some(_) => {
                // Version mismatch, clear cache
                self.clear_all()?;
                self.set_version()?;
            }
            None => {
                // No version set, initialize
                self.set_version()?;
            }
        }

        Ok(())
    }

    /// Set the cache version in metadata.
    fn set_version(&self) -> CacheResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('version', ?)",
            params![CACHE_VERSION.to_string()],
        )?;
        Ok(())
    }

    /// Get a value from the cache.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM cache WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> CacheResult<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO cache (key, value) VALUES (?, ?)",
            params![key, json],
        )?;
        Ok(())
    }

    /// Delete all entries matching a key prefix.
    pub fn delete_prefix(&self, prefix: &str) -> CacheResult<usize> {
        let pattern = format!("{}%", prefix);
        let rows = self
            .conn
            .execute("DELETE FROM cache WHERE key LIKE ?", params![pattern])?;
        Ok(rows)
    }

    /// Clear all cache entries (but keep metadata).
    pub fn clear_all(&self) -> CacheResult<()> {
        self.conn.execute("DELETE FROM cache", [])?;
        Ok(())
    }

    /// Clear cache entries for a specific connection.
    pub fn clear_connection(&self, conn_hash: &str) -> CacheResult<usize> {
        self.delete_prefix(&format!("{}:", conn_hash))
    }

    // ===== Crawl Result Caching =====

    fn crawl_key(conn_hash: &str, schema_pattern: &str) -> String {
        format!("{}:crawl:{}", conn_hash, schema_pattern)
    }

    /// Get a cached crawl result.
    pub fn get_crawl(
        &self,
        conn_hash: &str,
        schema_pattern: &str,
    ) -> CacheResult<Option<Vec<TableSchema>>> {
        self.get(&Self::crawl_key(conn_hash, schema_pattern))
    }

    /// Store a crawl result.
    pub fn put_crawl(
        &self,
        conn_hash: &str,
        schema_pattern: &str,
        schemas: &[TableSchema],
    ) -> CacheResult<()> {
        self.set(&Self::crawl_key(conn_hash, schema_pattern), &schemas)
    }
}
