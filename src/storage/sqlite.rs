//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ProductStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProductStore, StorageError, StorageResult};
use crate::storage::ProductRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const INSERT_SQL: &str = "INSERT OR IGNORE INTO alcohol_products
    (source, product_name, type, subtype, brand, abv, price, volume_packaging)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the database at `path`
    ///
    /// The connection runs in autocommit mode with full synchronous writes,
    /// so each stored product survives a crash right after the insert.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = FULL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Closes the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ProductRecord> {
    Ok(ProductRecord {
        source: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
        product_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        product_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        subtype: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        brand: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        abv: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        price: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        volume_packaging: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}

impl ProductStore for SqliteStore {
    fn last_source(&self) -> StorageResult<Option<String>> {
        let source: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT source FROM alcohol_products ORDER BY ROWID DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(source.flatten())
    }

    fn count_products(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM alcohol_products", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn insert_if_absent(&mut self, record: &ProductRecord) -> StorageResult<bool> {
        if record.product_name.is_empty() {
            return Err(StorageError::ConstraintViolation(
                "product_name cannot be empty".to_string(),
            ));
        }

        let inserted = self.conn.execute(
            INSERT_SQL,
            params![
                record.source,
                record.product_name,
                record.product_type,
                record.subtype,
                record.brand,
                record.abv,
                record.price,
                record.volume_packaging,
            ],
        )?;

        Ok(inserted == 1)
    }

    fn get_product(&self, product_name: &str) -> StorageResult<Option<ProductRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT source, product_name, type, subtype, brand, abv, price, volume_packaging
                 FROM alcohol_products WHERE product_name = ?1",
                params![product_name],
                record_from_row,
            )
            .optional()?;

        Ok(record)
    }
}
