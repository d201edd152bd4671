//! Report output for batch results.
//!
//! One row per resolved item, failed entries included with their status, so
//! consumers can tell "no value found" from "value is zero". The CSV variant
//! ends with a `Total` row summing estimated values.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::orchestrator::ResolvedItem;

/// Errors from report writing.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(String),

    #[error("Failed to encode report: {0}")]
    Encode(String),
}

const CSV_HEADER: [&str; 11] = [
    "name",
    "system",
    "title",
    "status",
    "loose",
    "complete",
    "new",
    "graded",
    "box_only",
    "manual_only",
    "estimated_value",
];

/// Write the CSV report. Unavailable prices render as `N/A`.
pub fn write_csv_report<W: Write>(items: &[ResolvedItem], writer: W) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(CSV_HEADER)
        .map_err(|e| ReportError::Encode(e.to_string()))?;

    for item in items {
        let prices = item.prices.clone().unwrap_or_default();
        let record = [
            item.entry.name.clone(),
            item.entry.system.clone(),
            item.title.clone().unwrap_or_default(),
            item.status.as_str().to_string(),
            money_cell(prices.loose),
            money_cell(prices.complete),
            money_cell(prices.new),
            money_cell(prices.graded),
            money_cell(prices.box_only),
            money_cell(prices.manual_only),
            format!("{:.2}", item.estimated_value),
        ];
        csv.write_record(&record)
            .map_err(|e| ReportError::Encode(e.to_string()))?;
    }

    let total: f64 = items.iter().map(|i| i.estimated_value).sum();
    let mut total_row = vec![String::new(); CSV_HEADER.len()];
    total_row[0] = "Total".to_string();
    total_row[CSV_HEADER.len() - 1] = format!("{:.2}", total);
    csv.write_record(&total_row)
        .map_err(|e| ReportError::Encode(e.to_string()))?;

    csv.flush().map_err(|e| ReportError::Io(e.to_string()))?;
    Ok(())
}

/// Write the CSV report to a file.
pub fn write_csv_report_to_path(path: &Path, items: &[ResolvedItem]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::Io(e.to_string()))?;
    write_csv_report(items, file)
}

/// JSON report envelope.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// When the report was generated (RFC 3339).
    pub generated_at: String,
    /// Sum of all estimated values.
    pub total_estimated_value: f64,
    pub items: &'a [ResolvedItem],
}

/// Write the JSON report with a generation timestamp and grand total.
pub fn write_json_report<W: Write>(items: &[ResolvedItem], writer: W) -> Result<(), ReportError> {
    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        total_estimated_value: items.iter().map(|i| i.estimated_value).sum(),
        items,
    };

    serde_json::to_writer_pretty(writer, &report).map_err(|e| ReportError::Encode(e.to_string()))
}

/// Write the JSON report to a file.
pub fn write_json_report_to_path(path: &Path, items: &[ResolvedItem]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::Io(e.to_string()))?;
    write_json_report(items, file)
}

fn money_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::orchestrator::ItemStatus;
    use crate::prices::PriceRecord;

    fn ok_item(name: &str, loose: f64, value: f64) -> ResolvedItem {
        ResolvedItem {
            entry: CatalogEntry {
                name: name.to_string(),
                system: "Gameboy".to_string(),
                has_box: false,
                has_manual: false,
            },
            title: Some(name.to_string()),
            listing_url: Some(format!("http://pricing.test/game/gameboy/{name}")),
            prices: Some(PriceRecord {
                loose: Some(loose),
                ..PriceRecord::default()
            }),
            estimated_value: value,
            status: ItemStatus::Ok,
            failure: None,
        }
    }

    fn failed_item(name: &str, status: ItemStatus) -> ResolvedItem {
        ResolvedItem::failed(
            &CatalogEntry {
                name: name.to_string(),
                system: "Gameboy".to_string(),
                has_box: false,
                has_manual: false,
            },
            status,
            "request timeout".to_string(),
        )
    }

    #[test]
    fn test_money_cell() {
        assert_eq!(money_cell(Some(1234.5)), "1234.50");
        assert_eq!(money_cell(Some(0.0)), "0.00");
        assert_eq!(money_cell(None), "N/A");
    }

    #[test]
    fn test_csv_report_contents() {
        let items = vec![
            ok_item("Pokemon Red", 30.0, 30.0),
            failed_item("Pokemon Blue", ItemStatus::FetchError),
        ];

        let mut buffer = Vec::new();
        write_csv_report(&items, &mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 4); // header + 2 items + total
        assert!(lines[0].starts_with("name,system,title,status,"));
        assert!(lines[1].contains("Pokemon Red,Gameboy,Pokemon Red,ok,30.00,N/A"));
        assert!(lines[2].contains("Pokemon Blue,Gameboy,,fetch_error,N/A"));
        assert_eq!(lines[3], "Total,,,,,,,,,,30.00");
    }

    #[test]
    fn test_csv_report_empty_batch() {
        let mut buffer = Vec::new();
        write_csv_report(&[], &mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 2); // header + total
        assert_eq!(lines[1], "Total,,,,,,,,,,0.00");
    }

    #[test]
    fn test_csv_total_sums_all_items() {
        let items = vec![
            ok_item("Pokemon Red", 30.0, 30.0),
            ok_item("Pokemon Blue", 25.5, 25.5),
        ];

        let mut buffer = Vec::new();
        write_csv_report(&items, &mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();

        assert!(report.lines().last().unwrap().ends_with("55.50"));
    }

    #[test]
    fn test_json_report_contents() {
        let items = vec![
            ok_item("Pokemon Red", 30.0, 30.0),
            failed_item("Pokemon Blue", ItemStatus::NotFound),
        ];

        let mut buffer = Vec::new();
        write_json_report(&items, &mut buffer).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(report["total_estimated_value"], 30.0);
        assert!(report["generated_at"].is_string());
        assert_eq!(report["items"].as_array().unwrap().len(), 2);
        assert_eq!(report["items"][0]["status"], "ok");
        assert_eq!(report["items"][1]["status"], "not_found");
        assert_eq!(report["items"][1]["failure"], "request timeout");
    }
}
