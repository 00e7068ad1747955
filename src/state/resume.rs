//! Resume cursor
//!
//! A previous run leaves behind the listing-page URL of the last product it
//! stored. While that marker has not been passed, discovered links are
//! suppressed instead of emitted.
//!
//! The marker is passed in one of two ways:
//!
//! - a discovered link equals the marker: that link is suppressed and every
//!   later link is emitted;
//! - the walker enters the listing page whose URL equals the marker: every
//!   link on that page is suppressed and emission starts with the next page.

use crate::storage::{ProductStore, StorageResult};

/// What the walker should do with a link that passed the dedup ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkVerdict {
    /// Hand the link to the consumer
    Emit,
    /// Drop the link; it belongs to work a previous run finished
    Suppress,
    /// The link is the marker itself; drop it and emit everything after it
    MarkerReached,
}

/// Tracks whether the resume marker has been passed in this traversal
#[derive(Debug, Clone)]
pub struct ResumeCursor {
    marker: Option<String>,
    satisfied: bool,
    on_marker_page: bool,
}

impl ResumeCursor {
    /// Creates a cursor; without a marker nothing is ever suppressed
    pub fn new(marker: Option<String>) -> Self {
        let satisfied = marker.is_none();
        Self {
            marker,
            satisfied,
            on_marker_page: false,
        }
    }

    /// Resolves the cursor from the source page of the newest stored row
    pub fn from_store(store: &dyn ProductStore) -> StorageResult<Self> {
        Ok(Self::new(store.last_source()?))
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// True while links are still being suppressed
    pub fn is_suppressing(&self) -> bool {
        !self.satisfied
    }

    /// Notes the listing page the walker is about to read
    pub fn enter_page(&mut self, page_url: &str) {
        if !self.satisfied && self.marker.as_deref() == Some(page_url) {
            tracing::info!("Reached last processed page: {}", page_url);
            self.on_marker_page = true;
        }
    }

    /// Decides the fate of a link that was not seen before in this run
    pub fn observe_link(&mut self, link: &str) -> LinkVerdict {
        if self.satisfied {
            return LinkVerdict::Emit;
        }

        if self.on_marker_page {
            return LinkVerdict::Suppress;
        }

        if self.marker.as_deref() == Some(link) {
            tracing::info!("Found last processed URL: {}", link);
            self.satisfied = true;
            return LinkVerdict::MarkerReached;
        }

        LinkVerdict::Suppress
    }

    /// Notes that every link of the current page has been observed
    pub fn leave_page(&mut self) {
        if self.on_marker_page {
            self.on_marker_page = false;
            self.satisfied = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ProductRecord, SqliteStore};

    #[test]
    fn test_no_marker_emits_everything() {
        let mut cursor = ResumeCursor::new(None);
        assert!(!cursor.is_suppressing());

        cursor.enter_page("https://example.com/search/Wine");
        assert_eq!(cursor.observe_link("https://example.com/p/a"), LinkVerdict::Emit);
        assert_eq!(cursor.observe_link("https://example.com/p/b"), LinkVerdict::Emit);
    }

    #[test]
    fn test_link_marker_is_skipped_then_emits() {
        let mut cursor = ResumeCursor::new(Some("https://example.com/p/b".to_string()));
        cursor.enter_page("https://example.com/search/Wine");

        assert_eq!(cursor.observe_link("https://example.com/p/a"), LinkVerdict::Suppress);
        assert_eq!(
            cursor.observe_link("https://example.com/p/b"),
            LinkVerdict::MarkerReached
        );
        assert!(!cursor.is_suppressing());
        assert_eq!(cursor.observe_link("https://example.com/p/c"), LinkVerdict::Emit);
    }

    #[test]
    fn test_page_marker_suppresses_whole_page() {
        let page2 = "https://example.com/search/Wine/page/2";
        let mut cursor = ResumeCursor::new(Some(page2.to_string()));

        cursor.enter_page("https://example.com/search/Wine");
        assert_eq!(cursor.observe_link("https://example.com/p/a"), LinkVerdict::Suppress);
        cursor.leave_page();
        assert!(cursor.is_suppressing());

        cursor.enter_page(page2);
        assert_eq!(cursor.observe_link("https://example.com/p/c"), LinkVerdict::Suppress);
        assert_eq!(cursor.observe_link("https://example.com/p/d"), LinkVerdict::Suppress);
        cursor.leave_page();
        assert!(!cursor.is_suppressing());

        cursor.enter_page("https://example.com/search/Wine/page/3");
        assert_eq!(cursor.observe_link("https://example.com/p/e"), LinkVerdict::Emit);
    }

    #[test]
    fn test_unmatched_marker_suppresses_forever() {
        let mut cursor = ResumeCursor::new(Some("https://elsewhere.example/".to_string()));
        cursor.enter_page("https://example.com/search/Wine");
        assert_eq!(cursor.observe_link("https://example.com/p/a"), LinkVerdict::Suppress);
        cursor.leave_page();
        assert!(cursor.is_suppressing());
    }

    #[test]
    fn test_from_empty_store() {
        let store = SqliteStore::new_in_memory().unwrap();
        let cursor = ResumeCursor::from_store(&store).unwrap();
        assert_eq!(cursor.marker(), None);
        assert!(!cursor.is_suppressing());
    }

    #[test]
    fn test_from_store_uses_newest_row() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        for (source, name) in [
            ("https://example.com/search/Wine/page/2", "Zinfandel"),
            ("https://example.com/search/Wine", "Albariño"),
        ] {
            store
                .insert_if_absent(&ProductRecord {
                    source: source.to_string(),
                    product_name: name.to_string(),
                    ..ProductRecord::default()
                })
                .unwrap();
        }

        let cursor = ResumeCursor::from_store(&store).unwrap();
        assert_eq!(cursor.marker(), Some("https://example.com/search/Wine"));
        assert!(cursor.is_suppressing());
    }
}
