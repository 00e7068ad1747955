//! Storage module for persisting harvested products
//!
//! This module handles all database operations for the harvester:
//! - SQLite database initialization and schema management
//! - Insert-if-absent persistence keyed on product name
//! - The two reads resumption needs: newest row's source page and row count

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{ProductStore, StorageError, StorageResult};

/// One stored product row
///
/// Every field is free text, exactly as the extraction collaborator returned
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    /// Listing page the product link was found on
    pub source: String,
    pub product_name: String,
    /// Catalog-wide product type (the `type` column)
    pub product_type: String,
    /// Extracted category
    pub subtype: String,
    pub brand: String,
    pub abv: String,
    pub price: String,
    pub volume_packaging: String,
}
