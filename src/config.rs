//! Widget configuration.
//!
//! Everything has a compiled-in default. The host may override the catalog
//! origin and the reply delay through the environment:
//! - `CHAT_WIDGET_CATALOG_ORIGIN`: default `http://127.0.0.1:8080`
//! - `CHAT_WIDGET_REPLY_DELAY_MS`: default 3000

use std::time::Duration;

pub const DEFAULT_CATALOG_ORIGIN: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CATALOG_BASE_PATH: &str = "/products";
pub const CATALOG_RESOURCE: &str = "demo-product-list";
pub const DEFAULT_TRIGGER_PHRASE: &str = "i want product recommendations";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 3000;
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 3;
pub const DEFAULT_GREETING: &str = "Hello there! Do you need any help?";

const ORIGIN_VAR: &str = "CHAT_WIDGET_CATALOG_ORIGIN";
const REPLY_DELAY_VAR: &str = "CHAT_WIDGET_REPLY_DELAY_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a whole number of milliseconds")]
    InvalidDelay { var: &'static str, value: String },
    #[error("invalid {var}: {value:?} must start with http:// or https://")]
    InvalidOrigin { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub catalog_origin: String,
    pub catalog_base_path: String,
    pub trigger_phrase: String,
    pub reply_delay: Duration,
    pub recommendation_count: usize,
    pub greeting: String,
    pub assistant_name: String,
    pub assistant_tagline: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            catalog_origin: DEFAULT_CATALOG_ORIGIN.to_string(),
            catalog_base_path: DEFAULT_CATALOG_BASE_PATH.to_string(),
            trigger_phrase: DEFAULT_TRIGGER_PHRASE.to_string(),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
            greeting: DEFAULT_GREETING.to_string(),
            assistant_name: "Shop Assistant".to_string(),
            assistant_tagline: "We reply immediately!".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(origin) = lookup(ORIGIN_VAR) {
            config.catalog_origin = parse_origin(&origin)?;
        }
        if let Some(delay) = lookup(REPLY_DELAY_VAR) {
            config.reply_delay = parse_delay(&delay)?;
        }

        Ok(config)
    }

    /// Full URL of the catalog resource, `<origin><base-path>/demo-product-list`.
    pub fn catalog_url(&self) -> String {
        let base = self.catalog_base_path.trim_end_matches('/');
        format!("{}{base}/{CATALOG_RESOURCE}", self.catalog_origin)
    }
}

fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let origin = raw.trim().trim_end_matches('/');
    if origin.starts_with("http://") || origin.starts_with("https://") {
        Ok(origin.to_string())
    } else {
        Err(ConfigError::InvalidOrigin {
            var: ORIGIN_VAR,
            value: raw.to_string(),
        })
    }
}

fn parse_delay(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDelay {
            var: REPLY_DELAY_VAR,
            value: raw.to_string(),
        })
}
