//! Product page collaborators
//!
//! The consumer loop drives a `ProductBrowser`: navigate to a product link,
//! then extract the product fields from whatever was loaded. Before the first
//! extraction of a run it may also block on an `OperatorCheckpoint`, giving a
//! person the chance to clear verification pages or popups.

mod checkpoint;
mod http;

pub use checkpoint::{LineCheckpoint, OperatorCheckpoint};
pub use http::{FieldSelectors, HttpProductBrowser};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by product page collaborators
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("navigation to {url} failed: {source}")]
    Navigation { url: String, source: reqwest::Error },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no product page has been loaded")]
    NotNavigated,

    #[error("field {field} not found on {url}")]
    MissingField { field: &'static str, url: String },

    #[error("operator prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Fields read from one product page, as free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub alcohol_by_volume: String,
    pub price: String,
    pub volume_or_packaging: String,
}

/// Navigates to product pages and reads their fields
#[async_trait]
pub trait ProductBrowser: Send {
    /// Loads `url`; returns once the page is ready for extraction
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Reads the product fields from the page loaded last
    async fn extract(&mut self) -> Result<ProductFields, BrowserError>;
}
