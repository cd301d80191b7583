//! Product catalog, fetched once per process.
//!
//! # Architecture
//!
//! - The catalog is fetched exactly once, in a background task started at
//!   boot, while the server is already accepting requests
//! - Requests read a snapshot of the [`LoadState`]: `Loading` until the fetch
//!   settles, then `Ready` or `Error` for the rest of the process lifetime
//! - There is no retry and no refresh; restarting the process refetches
//! - Products are never edited locally

mod source;

use std::sync::Arc;

use tienda_core::{LoadState, ProductRecord};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub use source::{FetchError, ProductSource, parse_products};

/// Shared, immutable product collection.
pub type Products = Arc<Vec<ProductRecord>>;

/// Handle to the process-wide catalog state.
#[derive(Clone, Default)]
pub struct Catalog {
    state: Arc<RwLock<LoadState<Products>>>,
}

impl Catalog {
    /// A catalog whose fetch has not settled yet.
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    /// A catalog that is already loaded with `products`.
    #[must_use]
    pub fn preloaded(products: Vec<ProductRecord>) -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Ready(Arc::new(products)))),
        }
    }

    /// A catalog whose fetch already failed with `message`.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Error(message.into()))),
        }
    }

    /// Spawn the one-time fetch from `source`.
    ///
    /// Only the first fetch to settle is recorded.
    pub fn start_loading(&self, source: ProductSource) -> JoinHandle<()> {
        let catalog = self.clone();
        tokio::spawn(async move {
            let outcome = source.fetch_all().await;
            catalog.settle(outcome).await;
        })
    }

    /// Record the outcome of the fetch.
    pub async fn settle(&self, outcome: Result<Vec<ProductRecord>, FetchError>) {
        match &outcome {
            Ok(products) => tracing::info!(count = products.len(), "Product catalog loaded"),
            Err(e) => tracing::error!(error = %e, "Failed to load product catalog"),
        }

        let mut state = self.state.write().await;
        if !state.resolve(outcome.map(Arc::new)) {
            tracing::warn!("Catalog already settled; ignoring later fetch outcome");
        }
    }

    /// Current load state.
    pub async fn snapshot(&self) -> LoadState<Products> {
        self.state.read().await.clone()
    }

    /// Loaded products, if the fetch succeeded.
    pub async fn products(&self) -> Option<Products> {
        self.state.read().await.ready().cloned()
    }
}
