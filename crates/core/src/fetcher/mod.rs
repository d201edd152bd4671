//! Page fetching abstraction.
//!
//! The `PageFetcher` trait is the only seam to the network; the rest of the
//! engine works on `FetchedPage` values and never sees a transport type.

mod http;
mod types;

pub use http::HttpFetcher;
pub use types::{FetchError, FetchedPage, PageFetcher};
