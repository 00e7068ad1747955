//! State module for tracking traversal and session progress
//!
//! # Components
//!
//! - `DedupLedger`: links already seen by the current traversal
//! - `ResumeCursor`: suppression of work completed by a previous run
//! - `SessionCounters`: durable total at start plus per-run outcome counts

mod ledger;
mod resume;
mod session;

// Re-export main types
pub use ledger::DedupLedger;
pub use resume::{LinkVerdict, ResumeCursor};
pub use session::SessionCounters;
