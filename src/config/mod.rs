//! Configuration module for Catalog-Harvest
//!
//! The harvester runs with built-in settings for its target catalog. A TOML
//! file can override any of them.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Walking catalog from: {}", config.site.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractionConfig, OutputConfig, SessionConfig, SiteConfig, UserAgentConfig,
    DEFAULT_DATABASE_PATH, DEFAULT_START_URL,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
