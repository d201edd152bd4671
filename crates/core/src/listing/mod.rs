//! Listing resolution from search results.
//!
//! Maps a catalog entry to one listing URL on the pricing source: extract
//! the search result rows, keep the entry's system, let the title matcher
//! pick the best row.

mod resolver;
mod types;

pub use resolver::{slug, ListingResolver};
pub use types::{Resolution, ResolveError, SearchCandidate};
