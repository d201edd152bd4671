//! Testing utilities and mock implementations.
//!
//! Provides a mock page fetcher and HTML fixtures so the full pipeline can
//! be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use gamepricer_core::testing::{fixtures, MockFetcher};
//!
//! let fetcher = MockFetcher::new();
//!
//! // Configure responses
//! fetcher.set_body(
//!     &fixtures::search_url("http://pricing.test", "Pokemon Red"),
//!     &fixtures::search_results_page(&[
//!         ("Gameboy", "Pokemon Red", "/game/gameboy/pokemon-red"),
//!     ]),
//! ).await;
//!
//! // Use as Arc<dyn PageFetcher> in a BatchRunner...
//! ```

mod mock_fetcher;

pub use mock_fetcher::MockFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    /// Search results page with one row per `(system, title, href)`.
    pub fn search_results_page(rows: &[(&str, &str, &str)]) -> String {
        let mut body = String::from(
            "<html><body><table id=\"games_table\">\
             <thead><tr><th>System</th><th>Title</th><th>Price</th></tr></thead><tbody>",
        );
        for (system, title, href) in rows {
            body.push_str(&format!(
                "<tr><td class=\"console\">{system}</td>\
                 <td class=\"title\"><a href=\"{href}\">{title}</a></td>\
                 <td class=\"price\">$1.00</td></tr>"
            ));
        }
        body.push_str("</tbody></table></body></html>");
        body
    }

    /// Listing page with a heading and the given `(cell id, display text)`
    /// price cells.
    pub fn listing_page(title: &str, cells: &[(&str, &str)]) -> String {
        let mut body = format!(
            "<html><body><h1 id=\"product_name\">{title}\n\
             <a href=\"/console\">Console</a></h1>\
             <table id=\"price_data\"><tr>"
        );
        for (id, text) in cells {
            body.push_str(&format!(
                "<td id=\"{id}\"><span class=\"price js-price\">{text}</span></td>"
            ));
        }
        body.push_str("</tr></table></body></html>");
        body
    }

    /// Listing page with all six standard cells filled in.
    pub fn full_listing_page(
        title: &str,
        loose: &str,
        complete: &str,
        new: &str,
        graded: &str,
        box_only: &str,
        manual_only: &str,
    ) -> String {
        listing_page(
            title,
            &[
                ("used_price", loose),
                ("complete_price", complete),
                ("new_price", new),
                ("graded_price", graded),
                ("box_only_price", box_only),
                ("manual_only_price", manual_only),
            ],
        )
    }

    /// A page with neither search results nor a price table.
    pub fn empty_page() -> String {
        "<html><body><p>Nothing here</p></body></html>".to_string()
    }

    /// The search URL the orchestrator builds for an entry name.
    pub fn search_url(base_url: &str, name: &str) -> String {
        format!(
            "{}/search-products?type=prices&q={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        )
    }
}
