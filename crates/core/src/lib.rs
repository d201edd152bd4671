pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod listing;
pub mod matcher;
pub mod orchestrator;
pub mod prices;
pub mod report;
pub mod testing;
pub mod valuation;

pub use catalog::{load_catalog, load_catalog_from_reader, CatalogEntry, CatalogError};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, QueryMode,
    SourceConfig,
};
pub use fetcher::{FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use listing::{ListingResolver, Resolution, ResolveError, SearchCandidate};
pub use matcher::{MatchFallback, MatcherConfig, TitleMatcher};
pub use orchestrator::{BatchConfig, BatchRunner, ItemStatus, ResolvedItem};
pub use prices::{
    parse_money, ListingPage, PriceFormat, PriceParseError, PriceRecord, PriceTableParser,
};
pub use report::{
    write_csv_report, write_csv_report_to_path, write_json_report, write_json_report_to_path,
    ReportError,
};
pub use valuation::{estimate, ValuationError};
