//! Catalog input loading.

mod loader;
mod types;

pub use loader::{load_catalog, load_catalog_from_reader};
pub use types::CatalogEntry;

use thiserror::Error;

/// Errors from catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read catalog: {0}")]
    Io(String),

    #[error("Invalid catalog row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}
