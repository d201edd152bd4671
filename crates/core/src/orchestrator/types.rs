//! Types for the batch orchestrator.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::prices::PriceRecord;

/// Terminal status of one entry's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Valued successfully.
    Ok,
    /// No acceptable listing match.
    NotFound,
    /// Network failure, timeout or non-success status.
    FetchError,
    /// An expected structural element was absent, or a price component
    /// required by the entry's flags was unavailable.
    ParseError,
}

impl ItemStatus {
    /// Stable lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Ok => "ok",
            ItemStatus::NotFound => "not_found",
            ItemStatus::FetchError => "fetch_error",
            ItemStatus::ParseError => "parse_error",
        }
    }
}

/// The outcome of one catalog entry's pipeline.
///
/// A batch produces exactly one of these per input entry, in entry order,
/// whatever each pipeline's fate.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedItem {
    /// The input entry this outcome belongs to.
    pub entry: CatalogEntry,
    /// Canonical listing title, when one was parsed.
    pub title: Option<String>,
    /// Listing page URL, when one was located.
    pub listing_url: Option<String>,
    /// Parsed prices, when the listing page was parsed.
    pub prices: Option<PriceRecord>,
    /// Estimated resale value; 0 for failed entries (see `status`).
    pub estimated_value: f64,
    /// Terminal pipeline status.
    pub status: ItemStatus,
    /// Failure detail for non-Ok statuses.
    pub failure: Option<String>,
}

impl ResolvedItem {
    /// Outcome for an entry that failed before any listing data existed.
    pub(crate) fn failed(entry: &CatalogEntry, status: ItemStatus, failure: String) -> Self {
        Self {
            entry: entry.clone(),
            title: None,
            listing_url: None,
            prices: None,
            estimated_value: 0.0,
            status,
            failure: Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(ItemStatus::Ok.as_str(), "ok");
        assert_eq!(ItemStatus::NotFound.as_str(), "not_found");
        assert_eq!(ItemStatus::FetchError.as_str(), "fetch_error");
        assert_eq!(ItemStatus::ParseError.as_str(), "parse_error");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::NotFound).unwrap(),
            "\"not_found\""
        );
        assert_eq!(serde_json::to_string(&ItemStatus::Ok).unwrap(), "\"ok\"");
    }

    #[test]
    fn test_failed_outcome() {
        let entry = CatalogEntry {
            name: "Pokemon Red".to_string(),
            system: "Gameboy".to_string(),
            has_box: false,
            has_manual: false,
        };

        let item = ResolvedItem::failed(&entry, ItemStatus::FetchError, "request timeout".into());
        assert_eq!(item.entry, entry);
        assert_eq!(item.status, ItemStatus::FetchError);
        assert_eq!(item.estimated_value, 0.0);
        assert!(item.prices.is_none());
        assert_eq!(item.failure.as_deref(), Some("request timeout"));
    }
}
