//! Database schema definitions
//!
//! The table layout is shared with earlier harvests of the same catalog, so
//! column names and types must not change.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS alcohol_products (
    source TEXT,
    product_name TEXT UNIQUE,
    type TEXT,
    subtype TEXT,
    brand TEXT,
    abv TEXT,
    price TEXT,
    volume_packaging TEXT
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
