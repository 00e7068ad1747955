//! Listing page parser
//!
//! Pulls two things out of a listing page:
//! - product-detail links, from every element carrying the link attribute
//! - the next listing page, from the pagination control labelled with the
//!   current page number plus one

use crate::config::SiteConfig;
use crate::url::{page_number, resolve_link, site_origin};
use crate::{ConfigError, HarvestError};
use scraper::{Html, Selector};

/// What one listing page contributes to the traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute product links in document order, duplicates included
    pub links: Vec<String>,

    /// Absolute URL of the following listing page, if the page links to one
    pub next_page: Option<String>,
}

/// Site-specific knowledge needed to read listing pages
#[derive(Debug, Clone)]
pub struct ListingLayout {
    origin: String,
    link_attribute: String,
    link_selector: Selector,
    pagination_selector: Selector,
    page_segment: String,
}

impl ListingLayout {
    /// Builds the layout from the site configuration
    ///
    /// The site origin is derived from `start-url` and `search-segment`.
    pub fn from_config(config: &SiteConfig) -> Result<Self, HarvestError> {
        let origin = site_origin(&config.start_url, &config.search_segment)?;

        let link_selector = Selector::parse(&format!("[{}]", config.link_attribute)).map_err(
            |_| ConfigError::InvalidSelector {
                field: "link-attribute".to_string(),
                selector: config.link_attribute.clone(),
            },
        )?;

        let pagination_selector = Selector::parse(&config.pagination_selector).map_err(|_| {
            ConfigError::InvalidSelector {
                field: "pagination-selector".to_string(),
                selector: config.pagination_selector.clone(),
            }
        })?;

        Ok(Self {
            origin,
            link_attribute: config.link_attribute.clone(),
            link_selector,
            pagination_selector,
            page_segment: config.page_segment.clone(),
        })
    }

    /// The prefix relative links are resolved against
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Parses one listing page fetched from `page_url`
    ///
    /// Markup without a usable pagination control simply yields no next page.
    pub fn parse(&self, html: &str, page_url: &str) -> ListingPage {
        let document = Html::parse_document(html);

        let links = document
            .select(&self.link_selector)
            .filter_map(|element| element.value().attr(&self.link_attribute))
            .filter_map(|raw| resolve_link(&self.origin, raw))
            .collect();

        let next_page = self.find_next_page(&document, page_url);

        ListingPage { links, next_page }
    }

    fn find_next_page(&self, document: &Html, page_url: &str) -> Option<String> {
        let Some(wanted) = page_number(page_url, &self.page_segment).checked_add(1) else {
            tracing::warn!("Page number of {} has no successor", page_url);
            return None;
        };

        for anchor in document.select(&self.pagination_selector) {
            let label = anchor.text().collect::<String>();
            let Ok(number) = label.trim().parse::<u32>() else {
                continue;
            };
            if number != wanted {
                continue;
            }

            match anchor.value().attr("href").and_then(|href| resolve_link(&self.origin, href)) {
                Some(next) => return Some(next),
                None => {
                    tracing::debug!("Pagination entry {} on {} has no usable href", wanted, page_url)
                }
            }
        }

        None
    }
}
