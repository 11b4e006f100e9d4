//! Spreadsheet ingestion: turns exported rows into scrape item seeds with
//! party-name variations precomputed and cached in the row data blob.

mod parser;

use crate::workflows::variations;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Row-data key caching generated variations per party column.
pub const PARTY_VARIATIONS_FIELD: &str = "party_variations";

/// Row-data key caching the variation count per party column.
pub const PARTY_VARIATION_COUNT_FIELD: &str = "party_variation_count";

const PRIOR_EFFECTIVE_DATE_FIELD: &str = "Prior Effective Date";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read spreadsheet export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid spreadsheet data: {0}")]
    Csv(#[from] csv::Error),
}

/// Lifecycle status of a scrape item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ScrapeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScrapeStatus::Pending => "pending",
            ScrapeStatus::Processing => "processing",
            ScrapeStatus::Completed => "completed",
            ScrapeStatus::Failed => "failed",
        }
    }

    /// Maps the scraper service's result status onto the item lifecycle.
    ///
    /// "Data not found" counts as completed: the lookup ran and there was
    /// nothing to fetch. Only genuine scraper errors stay failed.
    pub fn from_scraper_result(status: &str) -> Self {
        match status {
            "PDF_FOUND_SUCCESSFULLY" | "DATA_NOT_FOUND" => ScrapeStatus::Completed,
            _ => ScrapeStatus::Failed,
        }
    }
}

/// One ingested spreadsheet row, ready to be persisted as a scrape item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeItemSeed {
    pub row_number: usize,
    pub data: Map<String, Value>,
    pub status: ScrapeStatus,
}

pub struct SpreadsheetImporter;

impl SpreadsheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ScrapeItemSeed>, IngestError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ScrapeItemSeed>, IngestError> {
        let rows = parser::parse_rows(reader)?;
        let mut items = Vec::with_capacity(rows.len());

        for (index, mut row) in rows.into_iter().enumerate() {
            rewrite_prior_effective_date(&mut row);
            attach_party_variations(&mut row);

            items.push(ScrapeItemSeed {
                row_number: index + 1,
                data: row,
                status: ScrapeStatus::Pending,
            });
        }

        debug!(count = items.len(), "seeded scrape items from spreadsheet");
        Ok(items)
    }
}

/// A column holds a party name when "party" and "name" both appear in its
/// header, in that order ("Party Name 1", "party_name", ...).
pub fn is_party_name_column(header: &str) -> bool {
    let lowered = header.to_ascii_lowercase();
    match lowered.find("party") {
        Some(at) => lowered[at..].contains("name"),
        None => false,
    }
}

/// Party-name columns of a row, sorted for deterministic dispatch order.
pub fn party_name_columns(data: &Map<String, Value>) -> Vec<String> {
    let mut columns: Vec<String> = data
        .keys()
        .filter(|key| is_party_name_column(key))
        .cloned()
        .collect();
    columns.sort();
    columns
}

fn attach_party_variations(row: &mut Map<String, Value>) {
    let mut variations_by_column = Map::new();
    let mut counts_by_column = Map::new();

    for column in party_name_columns(row) {
        let raw = row
            .get(&column)
            .and_then(Value::as_str)
            .unwrap_or_default();
        let generated = variations::generate(raw);

        counts_by_column.insert(column.clone(), Value::from(generated.len()));
        variations_by_column.insert(column, Value::from(generated));
    }

    row.insert(
        PARTY_VARIATIONS_FIELD.to_string(),
        Value::Object(variations_by_column),
    );
    row.insert(
        PARTY_VARIATION_COUNT_FIELD.to_string(),
        Value::Object(counts_by_column),
    );
}

fn rewrite_prior_effective_date(row: &mut Map<String, Value>) {
    let Some(raw) = row.get(PRIOR_EFFECTIVE_DATE_FIELD).and_then(Value::as_str) else {
        return;
    };
    if let Some(normalized) = parser::normalize_spreadsheet_date(raw) {
        row.insert(
            PRIOR_EFFECTIVE_DATE_FIELD.to_string(),
            Value::String(normalized),
        );
    }
}
