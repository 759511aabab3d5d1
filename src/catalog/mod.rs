//! Product catalog: wire shape, normalized items, and the HTTP client that
//! fetches them.
//!
//! The remote endpoint returns records without pricing. Any record lacking a
//! price gets a placeholder drawn uniformly from [`PLACEHOLDER_PRICE_MIN`,
//! `PLACEHOLDER_PRICE_MAX`]. Placeholder prices are display filler, not real
//! pricing data.

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;

pub mod client;
pub mod sampler;

pub use client::HttpCatalog;

pub const PLACEHOLDER_PRICE_MIN: f64 = 10.0;
pub const PLACEHOLDER_PRICE_MAX: f64 = 200.0;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog http client build failed: {0}")]
    ClientBuild(String),
    #[error("catalog request failed: {0}")]
    Transport(String),
    #[error("catalog responded with status {status}: {body}")]
    Fetch { status: u16, body: String },
    #[error("catalog body could not be decoded: {0}")]
    Decode(String),
}

/// A record exactly as the catalog endpoint sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogRecord {
    pub id: String,
    pub display_title: String,
    pub image_url: String,
    pub url: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A catalog entry shaped for display as a recommendation card.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub detail_url: String,
}

/// Anything that can produce the current list of catalog items.
///
/// Implementations absorb their own failures: an unreachable or broken
/// catalog yields an empty list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_items(&self) -> Vec<Item>;
}

pub fn normalize_record<R: Rng + ?Sized>(record: RawCatalogRecord, rng: &mut R) -> Item {
    let price = record
        .price
        .unwrap_or_else(|| placeholder_price(rng));
    Item {
        id: record.id,
        name: record.display_title,
        price,
        image_url: record.image_url,
        detail_url: record.url,
    }
}

/// Decodes a catalog response body into normalized items.
pub fn parse_catalog<R: Rng + ?Sized>(body: &str, rng: &mut R) -> Result<Vec<Item>, CatalogError> {
    let records: Vec<RawCatalogRecord> =
        serde_json::from_str(body).map_err(|err| CatalogError::Decode(err.to_string()))?;
    Ok(records
        .into_iter()
        .map(|record| normalize_record(record, rng))
        .collect())
}

fn placeholder_price<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = rng.random_range(PLACEHOLDER_PRICE_MIN..=PLACEHOLDER_PRICE_MAX);
    (raw * 100.0).round() / 100.0
}
