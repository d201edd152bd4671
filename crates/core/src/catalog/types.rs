//! Catalog input types.

use serde::{Deserialize, Serialize};

/// One item of the input catalog.
///
/// Constructed only by the loader, which validates rows at the boundary;
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Item name used for search and title matching.
    pub name: String,
    /// System/platform the item belongs to, as the source spells it.
    pub system: String,
    /// Whether the item comes with its original box.
    pub has_box: bool,
    /// Whether the item comes with its manual.
    pub has_manual: bool,
}
