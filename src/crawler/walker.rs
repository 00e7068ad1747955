//! Pagination traversal engine
//!
//! `ListingWalker` turns a paginated catalog into a lazy, ordered sequence of
//! product links. Pages are fetched one at a time, only when the consumer has
//! drained every link of the previous page, with a courtesy delay between two
//! fetches.
//!
//! The walk ends when a page offers no link to the following page number, when
//! a fetch fails, or when the next page was already read in this walk. None of
//! these surface as errors to the consumer: the sequence just ends, and
//! `outcome()` tells why.

use crate::config::SiteConfig;
use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::ListingLayout;
use crate::state::{DedupLedger, LinkVerdict, ResumeCursor};
use crate::HarvestError;
use futures::Stream;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

/// One emitted product link and the listing page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    pub link: String,
    pub source_page: String,
}

/// Why a walk stopped producing links
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Links may still follow
    InProgress,
    /// The last page had no link to a following page
    Exhausted,
    /// A listing page could not be fetched
    FetchFailed { url: String, error: String },
    /// The next page had already been read in this walk
    Cycle { url: String },
}

impl WalkOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Lazy producer of product links over a paginated listing
pub struct ListingWalker<S> {
    source: S,
    layout: ListingLayout,
    delay: Duration,
    ledger: DedupLedger,
    cursor: ResumeCursor,
    pending: VecDeque<ProductLink>,
    next_page: Option<String>,
    visited: HashSet<String>,
    pages_fetched: usize,
    outcome: WalkOutcome,
}

impl<S: PageSource> ListingWalker<S> {
    /// Creates a walker starting at `start_url`
    ///
    /// `cursor` carries the marker left by a previous run; links are
    /// suppressed until the walk passes it.
    pub fn new(
        source: S,
        layout: ListingLayout,
        start_url: impl Into<String>,
        cursor: ResumeCursor,
    ) -> Self {
        Self {
            source,
            layout,
            delay: Duration::ZERO,
            ledger: DedupLedger::new(),
            cursor,
            pending: VecDeque::new(),
            next_page: Some(start_url.into()),
            visited: HashSet::new(),
            pages_fetched: 0,
            outcome: WalkOutcome::InProgress,
        }
    }

    /// Creates a walker for the configured catalog, with its courtesy delay
    pub fn from_config(
        source: S,
        config: &SiteConfig,
        cursor: ResumeCursor,
    ) -> Result<Self, HarvestError> {
        let layout = ListingLayout::from_config(config)?;
        Ok(Self::new(source, layout, config.start_url.clone(), cursor)
            .with_delay(Duration::from_millis(config.page_delay_ms)))
    }

    /// Sets the pause taken before every page fetch except the first
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Pulls the next product link, fetching listing pages as needed
    pub async fn next(&mut self) -> Option<ProductLink> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }

            let page_url = self.next_page.take()?;

            if self.pages_fetched > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.read_page(page_url).await;
        }
    }

    /// Exposes the remaining links as a stream
    pub fn stream(&mut self) -> impl Stream<Item = ProductLink> + '_ {
        futures::stream::unfold(self, |walker| async move {
            let item = walker.next().await?;
            Some((item, walker))
        })
    }

    pub fn outcome(&self) -> &WalkOutcome {
        &self.outcome
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Distinct links seen so far, suppressed ones included
    pub fn links_seen(&self) -> usize {
        self.ledger.len()
    }

    async fn read_page(&mut self, page_url: String) {
        tracing::info!("Fetching products from: {}", page_url);
        self.visited.insert(page_url.clone());

        let html = match self.source.fetch(&page_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error fetching page {}: {}", page_url, e);
                self.outcome = WalkOutcome::FetchFailed {
                    url: page_url,
                    error: e.to_string(),
                };
                return;
            }
        };
        self.pages_fetched += 1;

        let listing = self.layout.parse(&html, &page_url);

        self.cursor.enter_page(&page_url);
        let mut emitted = 0;
        for link in listing.links {
            if !self.ledger.insert(&link) {
                tracing::debug!("Skipping repeated link {}", link);
                continue;
            }

            match self.cursor.observe_link(&link) {
                LinkVerdict::Emit => {
                    emitted += 1;
                    self.pending.push_back(ProductLink {
                        link,
                        source_page: page_url.clone(),
                    });
                }
                LinkVerdict::Suppress => {
                    tracing::debug!("Skipping already processed link {}", link);
                }
                LinkVerdict::MarkerReached => {}
            }
        }
        self.cursor.leave_page();
        tracing::debug!("{} new product links on {}", emitted, page_url);

        match listing.next_page {
            Some(next) if self.visited.contains(&next) => {
                tracing::warn!("Next page {} was already read, stopping", next);
                self.outcome = WalkOutcome::Cycle { url: next };
            }
            Some(next) => {
                tracing::info!("Found next page: {}", next);
                self.next_page = Some(next);
            }
            None => {
                tracing::info!("No more pages found");
                self.outcome = WalkOutcome::Exhausted;
            }
        }
    }
}
