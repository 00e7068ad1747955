use serde::Deserialize;

/// Catalog the harvester walks when no configuration file is given
pub const DEFAULT_START_URL: &str = "https://www.allendalewine.com/search/categories/Wine";

/// Database file used when no configuration file is given
pub const DEFAULT_DATABASE_PATH: &str = "alcohol_products.db";

/// Main configuration structure for Catalog-Harvest
///
/// Every section is optional in the TOML file; missing sections and fields
/// fall back to the built-in catalog settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Listing traversal configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// First listing page of the catalog
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Path segment at which the start URL is cut to obtain the site origin
    #[serde(rename = "search-segment")]
    pub search_segment: String,

    /// Path segment that precedes an explicit page number
    #[serde(rename = "page-segment")]
    pub page_segment: String,

    /// Attribute holding the relative product-detail path
    #[serde(rename = "link-attribute")]
    pub link_attribute: String,

    /// Selector for the anchors inside the pagination control
    #[serde(rename = "pagination-selector")]
    pub pagination_selector: String,

    /// Pause between two listing page fetches (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Value stored in the `type` column of every product row
    #[serde(rename = "product-type")]
    pub product_type: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            search_segment: "/search".to_string(),
            page_segment: "/page/".to_string(),
            link_attribute: "data-href".to_string(),
            pagination_selector: "li.page-item0 a.page-link".to_string(),
            page_delay_ms: 1000,
            product_type: "wine".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CatalogHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

/// CSS selectors for the product fields read from a detail page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    #[serde(rename = "product-name")]
    pub product_name: String,
    pub category: String,
    pub brand: String,
    #[serde(rename = "alcohol-by-volume")]
    pub alcohol_by_volume: String,
    pub price: String,
    #[serde(rename = "volume-or-packaging")]
    pub volume_or_packaging: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            product_name: "h1".to_string(),
            category: ".product-category".to_string(),
            brand: ".product-brand".to_string(),
            alcohol_by_volume: ".product-abv".to_string(),
            price: ".product-price".to_string(),
            volume_or_packaging: ".product-size".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Field name and selector pairs, in record order
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("product-name", self.product_name.as_str()),
            ("category", self.category.as_str()),
            ("brand", self.brand.as_str()),
            ("alcohol-by-volume", self.alcohol_by_volume.as_str()),
            ("price", self.price.as_str()),
            ("volume-or-packaging", self.volume_or_packaging.as_str()),
        ]
    }
}

/// Consumer loop behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Wait for the operator before the first product is extracted
    #[serde(rename = "manual-checkpoint")]
    pub manual_checkpoint: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            manual_checkpoint: true,
        }
    }
}
