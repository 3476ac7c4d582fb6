use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::accident::{AccidentRecord, COLUMN_COUNT};
use crate::utils::constants::UNKNOWN_CITY;

/// The fully loaded accidents table.
///
/// Owned by the run and passed by reference to every analyzer; read-only
/// after the optional one-time [`fill_missing_numeric`](Dataset::fill_missing_numeric)
/// pass. Row count and column set are fixed once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<AccidentRecord>,
}

macro_rules! fill_column_mean {
    ($records:expr, $field:ident, $filled:expr) => {{
        let (sum, present) = $records
            .iter()
            .filter_map(|r| r.$field)
            .fold((0.0f64, 0u64), |(s, n), v| (s + v, n + 1));

        if present > 0 {
            let mean = sum / present as f64;
            for record in $records.iter_mut() {
                if record.$field.is_none() {
                    record.$field = Some(mean);
                    $filled += 1;
                }
            }
        }
    }};
}

impl Dataset {
    pub fn new(records: Vec<AccidentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AccidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fill absent numeric values with their column mean.
    ///
    /// The single permitted mutation of a loaded dataset. Columns with no
    /// present values at all are left untouched. Returns the number of
    /// values filled.
    pub fn fill_missing_numeric(&mut self) -> usize {
        let mut filled = 0usize;

        fill_column_mean!(self.records, end_lat, filled);
        fill_column_mean!(self.records, end_lng, filled);
        fill_column_mean!(self.records, distance_mi, filled);
        fill_column_mean!(self.records, number, filled);
        fill_column_mean!(self.records, temperature_f, filled);
        fill_column_mean!(self.records, wind_chill_f, filled);
        fill_column_mean!(self.records, humidity_pct, filled);
        fill_column_mean!(self.records, pressure_in, filled);
        fill_column_mean!(self.records, visibility_mi, filled);
        fill_column_mean!(self.records, wind_speed_mph, filled);
        fill_column_mean!(self.records, precipitation_in, filled);

        filled
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut cities = HashSet::new();
        let mut date_range: Option<(NaiveDateTime, NaiveDateTime)> = None;

        for record in &self.records {
            cities.insert(record.city.as_deref().unwrap_or(UNKNOWN_CITY));

            date_range = Some(match date_range {
                None => (record.start_time, record.start_time),
                Some((min, max)) => (min.min(record.start_time), max.max(record.start_time)),
            });
        }

        DatasetSummary {
            total_rows: self.records.len(),
            total_columns: COLUMN_COUNT,
            unique_cities: cities.len(),
            date_range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub unique_cities: usize,
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl DatasetSummary {
    pub fn report(&self) -> String {
        let range = match self.date_range {
            Some((from, to)) => format!("{} to {}", from, to),
            None => "no records".to_string(),
        };

        format!(
            "Records: {}\n\
            Columns: {}\n\
            Unique cities: {}\n\
            Date range: {}",
            self.total_rows, self.total_columns, self.unique_cities, range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, hour: u32) -> AccidentRecord {
        let start = NaiveDate::from_ymd_opt(2021, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        AccidentRecord::new(id, 2, start, start, 40.0, -83.0)
    }

    #[test]
    fn test_fill_missing_numeric_uses_column_mean() {
        let mut a = record("A-1", 6);
        a.temperature_f = Some(50.0);
        let mut b = record("A-2", 7);
        b.temperature_f = Some(70.0);
        let c = record("A-3", 8);

        let mut ds = Dataset::new(vec![a, b, c]);
        let filled = ds.fill_missing_numeric();

        assert_eq!(ds.records()[2].temperature_f, Some(60.0));
        // humidity has no present values anywhere, so it stays absent
        assert_eq!(ds.records()[0].humidity_pct, None);
        // temperature filled once for the third row
        assert!(filled >= 1);
    }

    #[test]
    fn test_summary() {
        let mut a = record("A-1", 6);
        a.city = Some("Columbus".to_string());
        let mut b = record("A-2", 23);
        b.city = Some("Columbus".to_string());
        let c = record("A-3", 12);

        let ds = Dataset::new(vec![a, b, c]);
        let summary = ds.summary();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.total_columns, 47);
        // Columbus plus the unknown-city bucket
        assert_eq!(summary.unique_cities, 2);
        assert!(summary.date_range.is_some());
    }

    #[test]
    fn test_empty_dataset_summary() {
        let ds = Dataset::new(vec![]);
        let summary = ds.summary();

        assert!(ds.is_empty());
        assert_eq!(summary.total_rows, 0);
        assert_eq!(summary.date_range, None);
        assert!(summary.report().contains("no records"));
    }
}
