//! Harvest coordinator - the consumer side of the traversal
//!
//! Pulls product links from a `ListingWalker` one at a time and, for each:
//! 1. navigates the product browser to the link
//! 2. waits for the operator, once, before the first extraction of the run
//! 3. extracts the product fields
//! 4. stores the product unless its name is already stored
//!
//! A failure in any of these steps is logged and the item is dropped; the
//! loop moves on to the next link.

use crate::browser::{OperatorCheckpoint, ProductBrowser};
use crate::crawler::fetcher::PageSource;
use crate::crawler::walker::{ListingWalker, ProductLink, WalkOutcome};
use crate::state::SessionCounters;
use crate::storage::{ProductRecord, ProductStore, StorageResult};
use futures::StreamExt;

/// What one harvest session did
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub counters: SessionCounters,
    pub outcome: WalkOutcome,
    pub pages_fetched: usize,
    /// Row count read back from the store after the session, if readable
    pub final_total: Option<u64>,
}

/// Drives extraction and storage for every emitted product link
pub struct Harvester<'a> {
    store: &'a mut dyn ProductStore,
    browser: &'a mut dyn ProductBrowser,
    checkpoint: &'a mut dyn OperatorCheckpoint,
    product_type: String,
    counters: SessionCounters,
    awaiting_operator: bool,
}

impl<'a> Harvester<'a> {
    /// Creates a harvester, reading the current row count from the store
    pub fn new(
        store: &'a mut dyn ProductStore,
        browser: &'a mut dyn ProductBrowser,
        checkpoint: &'a mut dyn OperatorCheckpoint,
        product_type: impl Into<String>,
    ) -> StorageResult<Self> {
        let total_before = store.count_products()?;
        Ok(Self {
            store,
            browser,
            checkpoint,
            product_type: product_type.into(),
            counters: SessionCounters::new(total_before),
            awaiting_operator: true,
        })
    }

    /// Enables or disables the one-time operator checkpoint
    pub fn with_manual_checkpoint(mut self, enabled: bool) -> Self {
        self.awaiting_operator = enabled;
        self
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    /// Consumes the walker until it ends
    pub async fn run<S: PageSource>(&mut self, walker: &mut ListingWalker<S>) -> SessionSummary {
        {
            let links = walker.stream();
            futures::pin_mut!(links);
            while let Some(item) = links.next().await {
                if let Err(e) = self.process(&item).await {
                    tracing::error!("Error processing product {}: {}", item.link, e);
                    self.counters.record_failed();
                }
            }
        }

        let final_total = match self.store.count_products() {
            Ok(total) => Some(total),
            Err(e) => {
                tracing::error!("Could not count stored products: {}", e);
                None
            }
        };

        SessionSummary {
            counters: self.counters,
            outcome: walker.outcome().clone(),
            pages_fetched: walker.pages_fetched(),
            final_total,
        }
    }

    /// Handles one product link
    async fn process(&mut self, item: &ProductLink) -> crate::Result<()> {
        self.browser.navigate(&item.link).await?;

        if self.awaiting_operator {
            self.checkpoint.wait_for_operator().await?;
            self.awaiting_operator = false;
        }

        tracing::info!(
            "Processing product {}: {}",
            self.counters.next_ordinal(),
            item.link
        );
        let fields = self.browser.extract().await?;

        tracing::info!(
            product = %fields.product_name,
            category = %fields.category,
            brand = %fields.brand,
            abv = %fields.alcohol_by_volume,
            price = %fields.price,
            packaging = %fields.volume_or_packaging,
            "Extracted product data"
        );

        let record = ProductRecord {
            source: item.source_page.clone(),
            product_name: fields.product_name,
            product_type: self.product_type.clone(),
            subtype: fields.category,
            brand: fields.brand,
            abv: fields.alcohol_by_volume,
            price: fields.price,
            volume_packaging: fields.volume_or_packaging,
        };

        if self.store.insert_if_absent(&record)? {
            self.counters.record_persisted();
        } else {
            tracing::info!("Product '{}' is already stored", record.product_name);
            self.counters.record_already_stored();
        }

        Ok(())
    }
}
