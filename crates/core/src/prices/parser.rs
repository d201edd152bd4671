//! Price table extraction from listing pages.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::types::{ListingPage, PriceFormat, PriceParseError, PriceRecord};

/// Sentinel the source renders for a price it does not track.
const UNAVAILABLE: &str = "N/A";

/// Extracts the six condition prices and the canonical title from a listing
/// page.
///
/// Selectors are compiled once at construction. Each price cell is read
/// independently: a missing or unparseable cell leaves that field
/// unavailable; only a missing table fails the parse.
pub struct PriceTableParser {
    format: PriceFormat,
    table: Selector,
    heading: Selector,
    price_span: Selector,
    loose_cell: Selector,
    complete_cell: Selector,
    new_cell: Selector,
    graded_cell: Selector,
    box_only_cell: Selector,
    manual_only_cell: Selector,
}

impl PriceTableParser {
    pub fn new(format: PriceFormat) -> Self {
        Self {
            format,
            table: Selector::parse("table#price_data").expect("valid selector"),
            heading: Selector::parse("h1#product_name").expect("valid selector"),
            price_span: Selector::parse("span.price.js-price").expect("valid selector"),
            loose_cell: Selector::parse("td#used_price").expect("valid selector"),
            complete_cell: Selector::parse("td#complete_price").expect("valid selector"),
            new_cell: Selector::parse("td#new_price").expect("valid selector"),
            graded_cell: Selector::parse("td#graded_price").expect("valid selector"),
            box_only_cell: Selector::parse("td#box_only_price").expect("valid selector"),
            manual_only_cell: Selector::parse("td#manual_only_price").expect("valid selector"),
        }
    }

    /// Parse a listing page body. Deterministic: the same body always
    /// produces the same record.
    pub fn parse(&self, html: &str) -> Result<ListingPage, PriceParseError> {
        let document = Html::parse_document(html);

        let table = document
            .select(&self.table)
            .next()
            .ok_or(PriceParseError::MissingPriceTable)?;

        let prices = PriceRecord {
            loose: self.cell_price(table, &self.loose_cell),
            complete: self.cell_price(table, &self.complete_cell),
            new: self.cell_price(table, &self.new_cell),
            graded: self.cell_price(table, &self.graded_cell),
            box_only: self.cell_price(table, &self.box_only_cell),
            manual_only: self.cell_price(table, &self.manual_only_cell),
        };

        Ok(ListingPage {
            title: self.listing_title(&document),
            prices,
        })
    }

    /// Canonical title: first text node of the page heading. The heading
    /// nests the system name in a child element, which is skipped.
    fn listing_title(&self, document: &Html) -> Option<String> {
        let heading = document.select(&self.heading).next()?;
        let title = heading.text().next()?.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }

    fn cell_price(&self, table: ElementRef<'_>, cell: &Selector) -> Option<f64> {
        let cell = table.select(cell).next()?;
        let span = cell.select(&self.price_span).next()?;
        let text: String = span.text().collect();
        parse_money(&text, &self.format)
    }
}

/// Parse a displayed price into a non-negative amount.
///
/// Strips whitespace, currency symbols and grouping separators, maps the
/// decimal separator to `.`, then parses. The literal `N/A` and anything
/// else that does not parse as a non-negative finite number yield `None`.
pub fn parse_money(text: &str, format: &PriceFormat) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| !format.currency_symbols.contains(*c))
        .filter(|c| *c != format.thousands_separator)
        .collect();

    if stripped == UNAVAILABLE {
        return None;
    }

    let normalized = if format.decimal_separator == '.' {
        stripped
    } else {
        stripped.replace(format.decimal_separator, ".")
    };

    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(amount),
        Ok(amount) => {
            debug!(amount, "Rejecting out-of-range price");
            None
        }
        Err(_) => {
            if !normalized.is_empty() {
                debug!(text = %normalized, "Unparseable price cell");
            }
            None
        }
    }
}
