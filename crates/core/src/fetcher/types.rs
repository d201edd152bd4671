//! Types for the page-fetch seam.

use async_trait::async_trait;
use thiserror::Error;

/// A fetched page with its post-redirect URL.
///
/// `final_url` is the URL the request actually landed on; the orchestrator
/// compares it against the search path to detect the source redirecting a
/// query straight to a listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,
    /// Final URL after redirects.
    pub final_url: String,
    /// Response body text.
    pub body: String,
}

/// Errors from page fetching.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timeout")]
    Timeout,

    #[error("HTTP {status} from {url}")]
    BadStatus { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for page fetch backends.
///
/// Implementations must be safe for concurrent use: one fetcher instance is
/// shared by every pipeline in a batch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Fetch a page, following redirects.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::BadStatus {
            url: "http://pricing.test/game/x".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "HTTP 503 from http://pricing.test/game/x");

        assert_eq!(FetchError::Timeout.to_string(), "request timeout");
    }

    #[test]
    fn test_fetched_page_clone_equality() {
        let page = FetchedPage {
            status: 200,
            final_url: "http://pricing.test/".to_string(),
            body: "<html></html>".to_string(),
        };
        assert_eq!(page.clone(), page);
    }
}
