//! URL handling module for Catalog-Harvest
//!
//! Listing links are compared by exact string equality, so nothing here
//! normalizes URLs. This module only derives the site origin, turns relative
//! product and pagination paths into absolute URLs, and reads the page number
//! out of a listing URL.

mod origin;
mod page_number;

// Re-export main functions
pub use origin::{resolve_link, site_origin};
pub use page_number::page_number;
