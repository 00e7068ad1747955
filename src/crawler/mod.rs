//! Crawler module: listing traversal and the harvest loop
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching of listing pages
//! - Listing parsing (product links and the next-page control)
//! - The lazy, resumable traversal engine
//! - The consumer loop that extracts and stores each product

mod coordinator;
mod fetcher;
mod parser;
mod walker;

pub use coordinator::{Harvester, SessionSummary};
pub use fetcher::{build_http_client, FetchError, HttpPageSource, PageSource};
pub use parser::{ListingLayout, ListingPage};
pub use walker::{ListingWalker, ProductLink, WalkOutcome};
