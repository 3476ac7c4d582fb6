pub mod cities;
pub mod geo;
pub mod missing;
pub mod temporal;

pub use cities::{aggregate_by_city, CityAccidents, CityCount};
pub use geo::{sample, Coordinate, CoordinateSample, GeoBounds, Sampler};
pub use missing::{profile, ColumnMissing, MissingValueReport};
pub use temporal::{classify, histogram, DaySelector, HourHistogram, TemporalSplit};
