//! Output module for operator-facing reports
//!
//! This module handles:
//! - The end-of-session summary printed after a harvest
//! - Statistics about the stored catalog (`--stats`)

pub mod stats;

pub use stats::{
    describe_outcome, load_statistics, print_session_summary, print_statistics, StoreStatistics,
};
