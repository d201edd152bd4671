//! Types for search-result resolution.

use thiserror::Error;

/// One row of the search results table.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    /// System/platform column as presented by the source.
    pub system: String,
    /// Listing title.
    pub title: String,
    /// Listing URL, possibly relative to the source root.
    pub url: String,
}

/// Outcome of resolving a catalog entry against a search results page.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The best-matching listing's URL.
    Listing(String),
    /// No candidate survived filtering and matching.
    NotFound,
}

/// Errors from search-result resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The search results table is structurally absent from the document.
    #[error("search results table not found in document")]
    MissingResultsTable,
}
