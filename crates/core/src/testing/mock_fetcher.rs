//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchedPage, PageFetcher};

/// Mock implementation of the `PageFetcher` trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured pages per URL
/// - Simulate redirects via `final_url`
/// - Inject per-URL or one-shot failures
/// - Record fetched URLs for assertions
///
/// Unknown URLs answer with a 404 `BadStatus` error.
pub struct MockFetcher {
    /// Configured pages keyed by request URL.
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    /// Configured failures keyed by request URL.
    errors: Arc<RwLock<HashMap<String, FetchError>>>,
    /// Recorded request URLs, in call order.
    fetches: Arc<RwLock<Vec<String>>>,
    /// If set, the next fetch fails with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a new mock fetcher with no configured pages.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            fetches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Serve a full page for a URL.
    pub async fn set_page(&self, url: &str, page: FetchedPage) {
        self.pages.write().await.insert(url.to_string(), page);
    }

    /// Serve a 200 body for a URL, with `final_url` equal to the request.
    pub async fn set_body(&self, url: &str, body: &str) {
        self.set_page(
            url,
            FetchedPage {
                status: 200,
                final_url: url.to_string(),
                body: body.to_string(),
            },
        )
        .await;
    }

    /// Serve a 200 body for a URL that lands on a different final URL.
    pub async fn set_redirect(&self, url: &str, final_url: &str, body: &str) {
        self.set_page(
            url,
            FetchedPage {
                status: 200,
                final_url: final_url.to_string(),
                body: body.to_string(),
            },
        )
        .await;
    }

    /// Fail every fetch of this URL with the given error.
    pub async fn set_error(&self, url: &str, error: FetchError) {
        self.errors.write().await.insert(url.to_string(), error);
    }

    /// Fail only the next fetch, whatever its URL.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// URLs fetched so far, in call order.
    pub async fn recorded_fetches(&self) -> Vec<String> {
        self.fetches.read().await.clone()
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }

    /// Clear recorded fetches.
    pub async fn clear_recorded(&self) {
        self.fetches.write().await.clear();
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.fetches.write().await.push(url.to_string());

        if let Some(err) = self.errors.read().await.get(url) {
            return Err(err.clone());
        }

        match self.pages.read().await.get(url) {
            Some(page) => Ok(page.clone()),
            None => Err(FetchError::BadStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
