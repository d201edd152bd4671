//! Types for listing price extraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Condition-specific prices extracted from a listing page.
///
/// Every field is independently either a non-negative amount or `None`
/// ("unavailable"). A cell that fails to extract or parse degrades to
/// `None`; it never fails the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Cartridge/disc only.
    pub loose: Option<f64>,
    /// Complete in box.
    pub complete: Option<f64>,
    /// Sealed.
    pub new: Option<f64>,
    /// Professionally graded.
    pub graded: Option<f64>,
    /// Original box alone.
    pub box_only: Option<f64>,
    /// Manual alone.
    pub manual_only: Option<f64>,
}

/// A parsed listing page: canonical title plus the price record.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    /// Canonical listing title from the page heading, when present.
    pub title: Option<String>,
    pub prices: PriceRecord,
}

/// Number format for price cells.
///
/// An explicit parameter instead of process-wide locale state: money parsing
/// is a pure function of the text and this configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFormat {
    /// Characters stripped as currency symbols.
    #[serde(default = "default_currency_symbols")]
    pub currency_symbols: String,
    /// Grouping separator stripped before parsing.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    /// Decimal separator mapped to `.` before parsing.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_currency_symbols() -> String {
    "$".to_string()
}

fn default_thousands_separator() -> char {
    ','
}

fn default_decimal_separator() -> char {
    '.'
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            currency_symbols: default_currency_symbols(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

/// Errors from price table parsing.
#[derive(Debug, Error)]
pub enum PriceParseError {
    /// The price table is structurally absent from the document.
    #[error("price table not found in listing page")]
    MissingPriceTable,
}
