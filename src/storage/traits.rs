//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::ProductRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every write is durable when the call returns; there is no batching.
pub trait ProductStore {
    /// Source page of the most recently inserted row, by insertion order
    fn last_source(&self) -> StorageResult<Option<String>>;

    /// Total number of stored products
    fn count_products(&self) -> StorageResult<u64>;

    /// Stores a product unless its name is already present
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A new row was written
    /// * `Ok(false)` - A row with this product name already existed
    fn insert_if_absent(&mut self, record: &ProductRecord) -> StorageResult<bool>;

    /// Looks up a product by its name
    fn get_product(&self, product_name: &str) -> StorageResult<Option<ProductRecord>>;
}
