use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{ProcessingError, Result};
use crate::models::{AccidentRecord, Dataset};
use crate::utils::constants::{US_MAX_LAT, US_MAX_LNG, US_MIN_LAT, US_MIN_LNG};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Start coordinates of a uniformly-random row subset, for density maps.
///
/// Non-deterministic across runs unless drawn with a seed. Density accuracy
/// is only as good as the sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateSample {
    points: Vec<Coordinate>,
}

impl CoordinateSample {
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Inclusive latitude/longitude box for geographic filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn continental_us() -> Self {
        Self {
            min_lat: US_MIN_LAT,
            max_lat: US_MAX_LAT,
            min_lng: US_MIN_LNG,
            max_lng: US_MAX_LNG,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat)
            && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

/// Draws rows uniformly at random without replacement and extracts their
/// start coordinates.
///
/// Unseeded and unbounded by default; a bounding box restricts the draw to
/// rows whose start coordinate falls inside it.
pub struct Sampler {
    seed: Option<u64>,
    bounds: Option<GeoBounds>,
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            seed: None,
            bounds: None,
        }
    }

    /// Fixed seed for reproducible extracts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sample `n` rows; `InsufficientRows` if fewer than `n` are eligible.
    pub fn sample(&self, dataset: &Dataset, n: usize) -> Result<CoordinateSample> {
        let eligible: Vec<&AccidentRecord> = match self.bounds {
            Some(bounds) => dataset
                .records()
                .iter()
                .filter(|r| bounds.contains(r.start_lat, r.start_lng))
                .collect(),
            None => dataset.records().iter().collect(),
        };

        let picked = match self.seed {
            Some(seed) => pick_indices(eligible.len(), n, &mut StdRng::seed_from_u64(seed))?,
            None => pick_indices(eligible.len(), n, &mut rand::thread_rng())?,
        };

        Ok(CoordinateSample {
            points: picked
                .into_iter()
                .map(|i| Coordinate {
                    lat: eligible[i].start_lat,
                    lng: eligible[i].start_lng,
                })
                .collect(),
        })
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw `n` rows uniformly at random without replacement from the full
/// dataset.
pub fn sample(dataset: &Dataset, n: usize) -> Result<CoordinateSample> {
    Sampler::new().sample(dataset, n)
}

fn pick_indices<R: Rng>(available: usize, n: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n > available {
        return Err(ProcessingError::InsufficientRows {
            requested: n,
            available,
        });
    }

    Ok(index::sample(rng, available, n).into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn dataset(n: usize) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2021, 1, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        // unique coordinates so distinctness is observable in the output
        Dataset::new(
            (0..n)
                .map(|i| {
                    AccidentRecord::new(
                        format!("A-{}", i),
                        2,
                        start,
                        start,
                        30.0 + i as f64 * 0.01,
                        -100.0 + i as f64 * 0.01,
                    )
                })
                .collect(),
        )
    }

    fn key(c: &Coordinate) -> (u64, u64) {
        (c.lat.to_bits(), c.lng.to_bits())
    }

    #[test]
    fn test_sample_returns_exactly_n_distinct_rows() {
        let ds = dataset(100);
        let sample = Sampler::new().with_seed(7).sample(&ds, 40).unwrap();

        assert_eq!(sample.len(), 40);
        let distinct: HashSet<_> = sample.points().iter().map(key).collect();
        assert_eq!(distinct.len(), 40);
    }

    #[test]
    fn test_sampling_whole_dataset_covers_it() {
        let ds = dataset(25);
        let sample = Sampler::new().with_seed(3).sample(&ds, 25).unwrap();

        let sampled: HashSet<_> = sample.points().iter().map(key).collect();
        let all: HashSet<_> = ds
            .records()
            .iter()
            .map(|r| (r.start_lat.to_bits(), r.start_lng.to_bits()))
            .collect();
        assert_eq!(sampled, all);
    }

    #[test]
    fn test_oversized_sample_fails() {
        let ds = dataset(10);
        let err = sample(&ds, 11).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::InsufficientRows {
                requested: 11,
                available: 10
            }
        ));
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let ds = dataset(50);
        let a = Sampler::new().with_seed(42).sample(&ds, 20).unwrap();
        let b = Sampler::new().with_seed(42).sample(&ds, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_filtering() {
        let ds = dataset(100); // lats 30.0..30.99
        let bounds = GeoBounds {
            min_lat: 30.0,
            max_lat: 30.2,
            min_lng: -180.0,
            max_lng: 180.0,
        };

        let sampler = Sampler::new().with_bounds(bounds).with_seed(9);
        let sample = sampler.sample(&ds, 10).unwrap();
        assert_eq!(sample.len(), 10);
        assert!(sample
            .points()
            .iter()
            .all(|c| bounds.contains(c.lat, c.lng)));

        // only ~21 rows fall inside the box
        assert!(sampler.sample(&ds, 50).is_err());
    }

    #[test]
    fn test_continental_us_bounds() {
        let bounds = GeoBounds::continental_us();
        assert!(bounds.contains(39.86, -84.05)); // Dayton
        assert!(!bounds.contains(21.3, -157.85)); // Honolulu
    }
}
