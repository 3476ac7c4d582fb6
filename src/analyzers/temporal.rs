use chrono::Weekday;
use serde::Serialize;

use crate::models::{AccidentRecord, Dataset};
use crate::utils::constants::HOURS_PER_DAY;

/// Which days of a subset feed the hour histogram.
///
/// `All` bins the whole subset (all weekdays, or all weekend days) and is
/// always recomputed from the raw records, never from a cached default, so
/// the aggregate view cannot drift from the per-day views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    Day(Weekday),
    All,
}

/// Weekday (Mon-Fri) vs weekend (Sat-Sun) record subsets.
///
/// Classification uses the record's local start timestamp with no timezone
/// conversion: the source spans multiple time zones but timestamps are
/// treated as one comparable local frame (a known limitation of the data,
/// carried forward deliberately).
#[derive(Debug)]
pub struct TemporalSplit<'a> {
    pub weekday: Vec<&'a AccidentRecord>,
    pub weekend: Vec<&'a AccidentRecord>,
}

impl TemporalSplit<'_> {
    pub fn total(&self) -> usize {
        self.weekday.len() + self.weekend.len()
    }
}

/// Partition every record into exactly one of the two subsets.
pub fn classify(dataset: &Dataset) -> TemporalSplit<'_> {
    let (weekend, weekday) = dataset.records().iter().partition(|r| r.is_weekend());

    TemporalSplit { weekday, weekend }
}

/// Counts per hour-of-day, 24 fixed-width bins, left-inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourHistogram {
    bins: [u64; HOURS_PER_DAY],
}

impl HourHistogram {
    pub fn bins(&self) -> &[u64; HOURS_PER_DAY] {
        &self.bins
    }

    /// Count for one hour, or `None` for an hour outside 0-23.
    pub fn bin(&self, hour: usize) -> Option<u64> {
        self.bins.get(hour).copied()
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Hour with the highest count; earliest hour wins ties.
    pub fn peak_hour(&self) -> usize {
        self.bins
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(hour, _)| hour)
            .unwrap_or(0)
    }
}

/// Bin a subset's start hours, optionally restricted to one day of week.
pub fn histogram(subset: &[&AccidentRecord], selector: DaySelector) -> HourHistogram {
    let mut bins = [0u64; HOURS_PER_DAY];

    for record in subset {
        if let DaySelector::Day(day) = selector {
            if record.start_weekday() != day {
                continue;
            }
        }
        bins[record.start_hour() as usize] += 1;
    }

    HourHistogram { bins }
}
