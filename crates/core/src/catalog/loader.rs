//! Catalog CSV loading with boundary validation.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::types::CatalogEntry;
use super::CatalogError;

/// Raw CSV row before validation.
#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    system: String,
    #[serde(rename = "box", default)]
    box_flag: Option<String>,
    #[serde(default)]
    manual: Option<String>,
}

/// Load and validate a catalog from a CSV file.
///
/// Columns: `name`, `system`, and optional `box`/`manual` flags where the
/// string `Yes` (any case) means present. A malformed row fails the whole
/// load with its line number; bad input is rejected here, not deferred into
/// the pipeline.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    let reader = csv::Reader::from_path(path).map_err(|e| CatalogError::Io(e.to_string()))?;

    read_catalog(reader)
}

/// Load a catalog from any reader (useful for testing).
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogError> {
    read_catalog(csv::Reader::from_reader(reader))
}

fn read_catalog<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut entries = Vec::new();

    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        let raw = row.map_err(|e| CatalogError::InvalidRow {
            line,
            reason: e.to_string(),
        })?;
        entries.push(validate_row(raw, line)?);
    }

    Ok(entries)
}

fn validate_row(raw: RawRow, line: usize) -> Result<CatalogEntry, CatalogError> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(CatalogError::InvalidRow {
            line,
            reason: "empty name".to_string(),
        });
    }

    let system = raw.system.trim();
    if system.is_empty() {
        return Err(CatalogError::InvalidRow {
            line,
            reason: "empty system".to_string(),
        });
    }

    Ok(CatalogEntry {
        name: name.to_string(),
        system: system.to_string(),
        has_box: yes_flag(raw.box_flag.as_deref()),
        has_manual: yes_flag(raw.manual.as_deref()),
    })
}

fn yes_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}
