use std::collections::HashMap;

use serde::Serialize;

use crate::models::Dataset;
use crate::utils::constants::UNKNOWN_CITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityAccidents {
    pub city: String,
    pub accidents: u64,
}

/// Accident counts per city, ranked descending.
///
/// Ties keep first-appearance order, so the ranking is deterministic for a
/// fixed input order. Rows with an absent city are grouped under
/// [`UNKNOWN_CITY`], which keeps the counts a partition of the dataset:
/// the values always sum to the row total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    entries: Vec<CityAccidents>,
}

impl CityCount {
    pub fn entries(&self) -> &[CityAccidents] {
        &self.entries
    }

    pub fn unique_cities(&self) -> usize {
        self.entries.len()
    }

    pub fn total_accidents(&self) -> u64 {
        self.entries.iter().map(|e| e.accidents).sum()
    }

    /// The `n` highest-ranked cities.
    pub fn top(&self, n: usize) -> &[CityAccidents] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Split into (count >= threshold, count < threshold), preserving rank
    /// order within each half.
    pub fn partition(&self, threshold: u64) -> (Vec<CityAccidents>, Vec<CityAccidents>) {
        self.entries
            .iter()
            .cloned()
            .partition(|e| e.accidents >= threshold)
    }
}

/// Group records by city and rank by accident count, descending.
pub fn aggregate_by_city(dataset: &Dataset) -> CityCount {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();

    for (index, record) in dataset.records().iter().enumerate() {
        let city = record.city.as_deref().unwrap_or(UNKNOWN_CITY);
        let entry = counts.entry(city).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(city, (count, first_seen))| (city, count, first_seen))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    CityCount {
        entries: ranked
            .into_iter()
            .map(|(city, accidents, _)| CityAccidents {
                city: city.to_string(),
                accidents,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccidentRecord;
    use chrono::NaiveDate;

    fn record(id: &str, city: Option<&str>) -> AccidentRecord {
        let start = NaiveDate::from_ymd_opt(2021, 5, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut r = AccidentRecord::new(id, 2, start, start, 32.78, -96.80);
        r.city = city.map(str::to_string);
        r
    }

    fn dataset(cities: &[Option<&str>]) -> Dataset {
        Dataset::new(
            cities
                .iter()
                .enumerate()
                .map(|(i, c)| record(&format!("A-{}", i), *c))
                .collect(),
        )
    }

    #[test]
    fn test_counts_are_ranked_and_sum_to_total() {
        let ds = dataset(&[
            Some("Dallas"),
            Some("Austin"),
            Some("Dallas"),
            Some("Houston"),
            Some("Dallas"),
            Some("Austin"),
        ]);

        let counts = aggregate_by_city(&ds);
        let entries = counts.entries();

        assert_eq!(entries[0].city, "Dallas");
        assert_eq!(entries[0].accidents, 3);
        assert_eq!(counts.total_accidents(), ds.len() as u64);
        assert!(entries.windows(2).all(|w| w[0].accidents >= w[1].accidents));
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let ds = dataset(&[Some("Austin"), Some("Houston"), Some("Houston"), Some("Austin")]);
        let counts = aggregate_by_city(&ds);

        assert_eq!(counts.entries()[0].city, "Austin");
        assert_eq!(counts.entries()[1].city, "Houston");
    }

    #[test]
    fn test_absent_city_is_bucketed() {
        let ds = dataset(&[Some("Dallas"), None, None]);
        let counts = aggregate_by_city(&ds);

        assert_eq!(counts.total_accidents(), 3);
        assert_eq!(counts.entries()[0].city, UNKNOWN_CITY);
        assert_eq!(counts.entries()[0].accidents, 2);
    }

    #[test]
    fn test_partition_by_threshold() {
        let counts = CityCount {
            entries: vec![
                CityAccidents { city: "A".into(), accidents: 1500 },
                CityAccidents { city: "C".into(), accidents: 1000 },
                CityAccidents { city: "B".into(), accidents: 999 },
            ],
        };

        let (high, low) = counts.partition(1000);

        assert_eq!(
            high.iter().map(|e| e.city.as_str()).collect::<Vec<_>>(),
            vec!["A", "C"]
        );
        assert_eq!(
            low.iter().map(|e| e.city.as_str()).collect::<Vec<_>>(),
            vec!["B"]
        );
    }

    #[test]
    fn test_top_n() {
        let ds = dataset(&[Some("Dallas"), Some("Dallas"), Some("Austin")]);
        let counts = aggregate_by_city(&ds);

        assert_eq!(counts.top(1).len(), 1);
        assert_eq!(counts.top(1)[0].city, "Dallas");
        assert_eq!(counts.top(10).len(), 2);
    }
}
