//! Batch orchestrator implementation.
//!
//! Runs every catalog entry's pipeline concurrently:
//! locate listing -> fetch -> parse price table -> estimate value.
//! Each pipeline's failure is captured into its own outcome; the batch
//! always returns one `ResolvedItem` per input entry, in input order.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::catalog::CatalogEntry;
use crate::config::{Config, QueryMode, SourceConfig};
use crate::fetcher::{FetchError, PageFetcher};
use crate::listing::{slug, ListingResolver, Resolution};
use crate::prices::PriceTableParser;
use crate::valuation::estimate;

use super::types::{ItemStatus, ResolvedItem};

/// Path of the search endpoint. A final URL without it means the source
/// redirected the query straight to a listing page.
const SEARCH_PATH: &str = "/search-products";

/// Failure of one entry's pipeline before a value could be computed.
#[derive(Debug, Error)]
enum EntryFailure {
    #[error("no acceptable listing match")]
    NoMatch,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Parse(String),
}

impl EntryFailure {
    fn status(&self) -> ItemStatus {
        match self {
            EntryFailure::NoMatch => ItemStatus::NotFound,
            EntryFailure::Fetch(_) => ItemStatus::FetchError,
            EntryFailure::Parse(_) => ItemStatus::ParseError,
        }
    }
}

/// How an entry's listing page was obtained.
enum Located {
    /// The source redirected the query straight to a listing page; the
    /// already-fetched body is the listing, no second fetch happens.
    AlreadyResolved { url: String, body: String },
    /// A listing resolved from search results and fetched separately.
    Fetched { url: String, body: String },
}

impl Located {
    fn into_parts(self) -> (String, String) {
        match self {
            Located::AlreadyResolved { url, body } | Located::Fetched { url, body } => (url, body),
        }
    }
}

/// The batch orchestrator: fans catalog entries out over shared fetch
/// capacity and collects one outcome per entry.
pub struct BatchRunner {
    source: SourceConfig,
    max_concurrent_fetches: usize,
    fetcher: Arc<dyn PageFetcher>,
    resolver: ListingResolver,
    parser: PriceTableParser,
}

impl BatchRunner {
    pub fn new(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            resolver: ListingResolver::new(&config.matcher),
            parser: PriceTableParser::new(config.prices),
            max_concurrent_fetches: config.batch.max_concurrent_fetches,
            source: config.source,
            fetcher,
        }
    }

    /// Run the full batch.
    ///
    /// The result has exactly one item per entry, in entry order; no
    /// entry's failure affects any other entry or the batch itself.
    pub async fn run(&self, entries: &[CatalogEntry]) -> Vec<ResolvedItem> {
        info!(
            entries = entries.len(),
            fetcher = self.fetcher.name(),
            "Starting batch valuation"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));

        let pipelines = entries.iter().map(|entry| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                self.resolve_entry(entry).await
            }
        });

        // join_all yields results in submission order, so the 1:1 mapping
        // back to entries holds whatever order pipelines complete in.
        let items = futures::future::join_all(pipelines).await;

        let ok = items.iter().filter(|i| i.status == ItemStatus::Ok).count();
        info!(ok, failed = items.len() - ok, "Batch complete");

        items
    }

    async fn resolve_entry(&self, entry: &CatalogEntry) -> ResolvedItem {
        debug!(name = %entry.name, system = %entry.system, "Pipeline started");

        match self.price_entry(entry).await {
            Ok(item) => item,
            Err(failure) => {
                warn!(
                    name = %entry.name,
                    system = %entry.system,
                    error = %failure,
                    "Entry failed"
                );
                ResolvedItem::failed(entry, failure.status(), failure.to_string())
            }
        }
    }

    async fn price_entry(&self, entry: &CatalogEntry) -> Result<ResolvedItem, EntryFailure> {
        let (listing_url, body) = self.locate_listing(entry).await?.into_parts();

        let page = self
            .parser
            .parse(&body)
            .map_err(|e| EntryFailure::Parse(e.to_string()))?;

        match estimate(&page.prices, entry.has_box, entry.has_manual) {
            Ok(value) => {
                debug!(name = %entry.name, value, "Entry valued");
                Ok(ResolvedItem {
                    entry: entry.clone(),
                    title: page.title,
                    listing_url: Some(listing_url),
                    prices: Some(page.prices),
                    estimated_value: value,
                    status: ItemStatus::Ok,
                    failure: None,
                })
            }
            // Keep what was parsed so the report shows why no value came out.
            Err(e) => Ok(ResolvedItem {
                entry: entry.clone(),
                title: page.title,
                listing_url: Some(listing_url),
                prices: Some(page.prices),
                estimated_value: 0.0,
                status: ItemStatus::ParseError,
                failure: Some(e.to_string()),
            }),
        }
    }

    /// Locate the listing page for an entry.
    async fn locate_listing(&self, entry: &CatalogEntry) -> Result<Located, EntryFailure> {
        match self.source.query_mode {
            QueryMode::Direct => {
                let page = self.fetcher.fetch(&self.direct_url(entry)).await?;
                Ok(Located::Fetched {
                    url: page.final_url,
                    body: page.body,
                })
            }
            QueryMode::Search => {
                let page = self.fetcher.fetch(&self.search_url(entry)).await?;

                if !page.final_url.contains(SEARCH_PATH) {
                    debug!(
                        name = %entry.name,
                        url = %page.final_url,
                        "Search redirected straight to listing"
                    );
                    return Ok(Located::AlreadyResolved {
                        url: page.final_url,
                        body: page.body,
                    });
                }

                match self
                    .resolver
                    .resolve(entry, &page.body)
                    .map_err(|e| EntryFailure::Parse(e.to_string()))?
                {
                    Resolution::NotFound => Err(EntryFailure::NoMatch),
                    Resolution::Listing(url) => {
                        let page = self.fetcher.fetch(&self.absolute_url(&url)).await?;
                        Ok(Located::Fetched {
                            url: page.final_url,
                            body: page.body,
                        })
                    }
                }
            }
        }
    }

    fn search_url(&self, entry: &CatalogEntry) -> String {
        format!(
            "{}{}?type=prices&q={}",
            self.source.base_url.trim_end_matches('/'),
            SEARCH_PATH,
            urlencoding::encode(&entry.name)
        )
    }

    fn direct_url(&self, entry: &CatalogEntry) -> String {
        format!(
            "{}/game/{}/{}",
            self.source.base_url.trim_end_matches('/'),
            slug(&entry.system),
            slug(&entry.name)
        )
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!(
                "{}/{}",
                self.source.base_url.trim_end_matches('/'),
                url.trim_start_matches('/')
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockFetcher};

    const BASE: &str = "http://pricing.test";

    fn entry(name: &str, system: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            system: system.to_string(),
            has_box: false,
            has_manual: false,
        }
    }

    fn runner_with(fetcher: Arc<MockFetcher>) -> BatchRunner {
        let mut config = Config::default();
        config.source.base_url = BASE.to_string();
        BatchRunner::new(config, fetcher)
    }

    #[test]
    fn test_search_url_encodes_name() {
        let runner = runner_with(Arc::new(MockFetcher::new()));
        assert_eq!(
            runner.search_url(&entry("Pokemon Red", "Gameboy")),
            "http://pricing.test/search-products?type=prices&q=Pokemon%20Red"
        );
    }

    #[test]
    fn test_direct_url_slugs_segments() {
        let runner = runner_with(Arc::new(MockFetcher::new()));
        assert_eq!(
            runner.direct_url(&entry("Pokemon Fire Red", "Gameboy Advance")),
            "http://pricing.test/game/gameboy-advance/pokemon-fire-red"
        );
    }

    #[test]
    fn test_absolute_url() {
        let runner = runner_with(Arc::new(MockFetcher::new()));
        assert_eq!(
            runner.absolute_url("/game/gameboy/pokemon-red"),
            "http://pricing.test/game/gameboy/pokemon-red"
        );
        assert_eq!(
            runner.absolute_url("https://elsewhere.test/x"),
            "https://elsewhere.test/x"
        );
    }

    #[tokio::test]
    async fn test_redirect_fast_path_skips_second_fetch() {
        let fetcher = Arc::new(MockFetcher::new());
        let e = entry("Pokemon Red", "Gameboy");

        let listing = fixtures::full_listing_page(
            "Pokemon Red", "$30.00", "$50.00", "$300.00", "N/A", "$15.00", "$9.99",
        );
        fetcher
            .set_redirect(
                &fixtures::search_url(BASE, "Pokemon Red"),
                "http://pricing.test/game/gameboy/pokemon-red",
                &listing,
            )
            .await;

        let runner = runner_with(Arc::clone(&fetcher));
        let items = runner.run(std::slice::from_ref(&e)).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, ItemStatus::Ok);
        assert_eq!(items[0].estimated_value, 30.0);
        assert_eq!(
            items[0].listing_url.as_deref(),
            Some("http://pricing.test/game/gameboy/pokemon-red")
        );
        assert_eq!(fetcher.fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_not_found_when_no_candidates_match() {
        let fetcher = Arc::new(MockFetcher::new());
        let e = entry("Pokemon Red", "Gameboy");

        let search = fixtures::search_results_page(&[(
            "Nintendo DS",
            "Pokemon Red",
            "/game/ds/pokemon-red",
        )]);
        fetcher
            .set_body(&fixtures::search_url(BASE, "Pokemon Red"), &search)
            .await;

        let runner = runner_with(fetcher);
        let items = runner.run(std::slice::from_ref(&e)).await;

        assert_eq!(items[0].status, ItemStatus::NotFound);
        assert!(items[0].prices.is_none());
    }

    #[tokio::test]
    async fn test_valuation_failure_keeps_parsed_data() {
        let fetcher = Arc::new(MockFetcher::new());
        let e = CatalogEntry {
            has_box: true,
            ..entry("Pokemon Red", "Gameboy")
        };

        // Box flagged but box-only price is N/A.
        let listing = fixtures::full_listing_page(
            "Pokemon Red", "$30.00", "$50.00", "$300.00", "N/A", "N/A", "$9.99",
        );
        fetcher
            .set_redirect(
                &fixtures::search_url(BASE, "Pokemon Red"),
                "http://pricing.test/game/gameboy/pokemon-red",
                &listing,
            )
            .await;

        let runner = runner_with(fetcher);
        let items = runner.run(std::slice::from_ref(&e)).await;

        assert_eq!(items[0].status, ItemStatus::ParseError);
        assert_eq!(items[0].estimated_value, 0.0);
        assert_eq!(items[0].title.as_deref(), Some("Pokemon Red"));
        let prices = items[0].prices.as_ref().unwrap();
        assert_eq!(prices.loose, Some(30.0));
        assert_eq!(prices.box_only, None);
    }
}
