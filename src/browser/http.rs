//! HTTP-backed product browser
//!
//! Navigation is a plain GET; extraction reads the first element matching each
//! field's CSS selector.

use crate::browser::{BrowserError, ProductBrowser, ProductFields};
use crate::config::ExtractionConfig;
use crate::ConfigError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

/// Parsed selectors for every product field
#[derive(Debug, Clone)]
pub struct FieldSelectors {
    product_name: Selector,
    category: Selector,
    brand: Selector,
    alcohol_by_volume: Selector,
    price: Selector,
    volume_or_packaging: Selector,
}

impl FieldSelectors {
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let parse = |field: &str, selector: &str| {
            Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
                field: field.to_string(),
                selector: selector.to_string(),
            })
        };

        Ok(Self {
            product_name: parse("product-name", config.product_name.as_str())?,
            category: parse("category", config.category.as_str())?,
            brand: parse("brand", config.brand.as_str())?,
            alcohol_by_volume: parse("alcohol-by-volume", config.alcohol_by_volume.as_str())?,
            price: parse("price", config.price.as_str())?,
            volume_or_packaging: parse("volume-or-packaging", config.volume_or_packaging.as_str())?,
        })
    }

    /// Extracts the fields from a product page body
    ///
    /// A page without a product name is rejected since the name keys the
    /// stored row. Any other missing field is left empty.
    pub fn extract(&self, html: &str, url: &str) -> Result<ProductFields, BrowserError> {
        let document = Html::parse_document(html);

        let product_name = first_text(&document, &self.product_name);
        if product_name.is_empty() {
            return Err(BrowserError::MissingField {
                field: "product-name",
                url: url.to_string(),
            });
        }

        Ok(ProductFields {
            product_name,
            category: first_text(&document, &self.category),
            brand: first_text(&document, &self.brand),
            alcohol_by_volume: first_text(&document, &self.alcohol_by_volume),
            price: first_text(&document, &self.price),
            volume_or_packaging: first_text(&document, &self.volume_or_packaging),
        })
    }
}

/// Whitespace-collapsed text of the first match, or an empty string
fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Product browser that loads pages over HTTP
pub struct HttpProductBrowser {
    client: Client,
    selectors: FieldSelectors,
    loaded: Option<LoadedPage>,
}

struct LoadedPage {
    url: String,
    body: String,
}

impl HttpProductBrowser {
    pub fn new(client: Client, selectors: FieldSelectors) -> Self {
        Self {
            client,
            selectors,
            loaded: None,
        }
    }
}

#[async_trait]
impl ProductBrowser for HttpProductBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.loaded = None;

        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| BrowserError::Navigation {
                    url: url.to_string(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| BrowserError::Navigation {
                url: url.to_string(),
                source,
            })?;

        self.loaded = Some(LoadedPage {
            url: url.to_string(),
            body,
        });
        Ok(())
    }

    async fn extract(&mut self) -> Result<ProductFields, BrowserError> {
        let page = self.loaded.as_ref().ok_or(BrowserError::NotNavigated)?;
        self.selectors.extract(&page.body, &page.url)
    }
}
