//! Statistics generation from the product database
//!
//! This module provides functionality for extracting and displaying
//! harvest statistics from the storage layer.

use crate::crawler::{SessionSummary, WalkOutcome};
use crate::storage::{ProductStore, StorageResult};

/// What the store currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatistics {
    /// Total number of stored products
    pub total_products: u64,

    /// Listing page the next run will resume from
    pub resume_marker: Option<String>,
}

/// Loads statistics from storage
pub fn load_statistics(store: &dyn ProductStore) -> StorageResult<StoreStatistics> {
    Ok(StoreStatistics {
        total_products: store.count_products()?,
        resume_marker: store.last_source()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Catalog Statistics ===\n");
    println!("  Products stored: {}", stats.total_products);
    match &stats.resume_marker {
        Some(marker) => println!("  Next run resumes after: {}", marker),
        None => println!("  Next run starts fresh"),
    }
}

/// One-line explanation of why the traversal stopped
pub fn describe_outcome(outcome: &WalkOutcome) -> String {
    match outcome {
        WalkOutcome::InProgress => "traversal interrupted".to_string(),
        WalkOutcome::Exhausted => "no more pages found".to_string(),
        WalkOutcome::FetchFailed { url, error } => {
            format!("stopped at {} ({})", url, error)
        }
        WalkOutcome::Cycle { url } => format!("stopped at already visited page {}", url),
    }
}

/// Prints the end-of-session summary
pub fn print_session_summary(summary: &SessionSummary) {
    let counters = &summary.counters;

    println!("\nSession summary:");
    println!("  Listing pages read: {}", summary.pages_fetched);
    println!("  Products processed this session: {}", counters.persisted);
    if counters.already_stored > 0 {
        println!("  Products already stored: {}", counters.already_stored);
    }
    if counters.failed > 0 {
        println!("  Products skipped after errors: {}", counters.failed);
    }
    match summary.final_total {
        Some(total) => println!("  Total products in database: {}", total),
        None => println!("  Total products in database: unknown"),
    }
    println!("  Traversal: {}", describe_outcome(&summary.outcome));
}
