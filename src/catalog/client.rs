use super::{parse_catalog, CatalogError, CatalogSource, Item};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;
use tracing::{debug, error};

/// Fetches the demo product list over HTTP.
///
/// One GET per call. No retry, no caching, and no timeout beyond the
/// transport default.
pub struct HttpCatalog {
    http: reqwest::Client,
    url: String,
    rng: Mutex<StdRng>,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| CatalogError::ClientBuild(err.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// Replaces the random source used for placeholder prices.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub async fn try_fetch(&self) -> Result<Vec<Item>, CatalogError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|err| CatalogError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, url = %self.url, "catalog: non-success response");
            return Err(CatalogError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| CatalogError::Transport(err.to_string()))?;

        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        parse_catalog(&body, &mut *rng)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_items(&self) -> Vec<Item> {
        match self.try_fetch().await {
            Ok(items) => {
                debug!(count = items.len(), "catalog: items fetched");
                items
            }
            Err(err) => {
                error!(error = %err, url = %self.url, "catalog: failed to fetch products");
                Vec::new()
            }
        }
    }
}
