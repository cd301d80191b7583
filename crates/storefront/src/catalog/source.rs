//! HTTP client for the remote product catalog.

use std::sync::Arc;

use tienda_core::ProductRecord;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ProductSourceConfig;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Catalog returned status {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only client for the catalog endpoint.
///
/// The endpoint returns the whole collection in one JSON array; filtering and
/// pagination are never delegated to it.
#[derive(Clone)]
pub struct ProductSource {
    inner: Arc<ProductSourceInner>,
}

struct ProductSourceInner {
    client: reqwest::Client,
    url: Url,
}

impl ProductSource {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ProductSourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ProductSourceInner {
                client,
                url: config.url.clone(),
            }),
        })
    }

    /// The catalog endpoint.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the request fails, the status is not a
    /// success, or the body is not a JSON array of products.
    #[instrument(skip(self), fields(url = %self.inner.url))]
    pub async fn fetch_all(&self) -> Result<Vec<ProductRecord>, FetchError> {
        let response = self
            .inner
            .client
            .get(self.inner.url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        let products = parse_products(&body)?;

        debug!(count = products.len(), "Fetched product catalog");
        Ok(products)
    }
}

/// Parse the catalog body.
///
/// # Errors
///
/// Returns `FetchError::Parse` if the body is not a JSON array of products.
pub fn parse_products(body: &str) -> Result<Vec<ProductRecord>, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        tracing::warn!(error = %e, body = %preview, "Unreadable catalog response");
        FetchError::Parse(e)
    })
}
