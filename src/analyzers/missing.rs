use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, COLUMNS};

/// Per-column missing-value percentages, sorted descending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValueReport {
    entries: Vec<ColumnMissing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMissing {
    pub column: &'static str,
    pub percent_missing: f64,
}

impl MissingValueReport {
    pub fn entries(&self) -> &[ColumnMissing] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn percent_for(&self, column: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.percent_missing)
    }
}

/// Profile the fraction of absent values per column.
///
/// Entries are `count(absent) / total_rows * 100`, sorted descending and
/// filtered to those strictly above `min_percent`. A column with zero absent
/// values never appears for any `min_percent >= 0`.
pub fn profile(dataset: &Dataset, min_percent: f64) -> Result<MissingValueReport> {
    if dataset.is_empty() {
        return Err(ProcessingError::EmptyDataset);
    }

    let total = dataset.len() as f64;
    let mut entries: Vec<ColumnMissing> = COLUMNS
        .iter()
        .map(|column| {
            let absent = dataset
                .records()
                .iter()
                .filter(|&r| (column.is_absent)(r))
                .count();
            ColumnMissing {
                column: column.name,
                percent_missing: absent as f64 / total * 100.0,
            }
        })
        .filter(|e| e.percent_missing > min_percent)
        .collect();

    // Percentages are never NaN here; ties keep column order
    entries.sort_by(|a, b| {
        b.percent_missing
            .partial_cmp(&a.percent_missing)
            .unwrap_or(Ordering::Equal)
    });

    Ok(MissingValueReport { entries })
}
