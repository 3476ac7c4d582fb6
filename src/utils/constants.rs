/// Default input file names (relative to the working directory)
pub const DEFAULT_SOURCE_FILE: &str = "US_Accidents_Dec21_updated.csv";
pub const DEFAULT_SNAPSHOT_FILE: &str = "US_Accidents_Dec21_updated.bin";

/// Severity constraints
pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 4;

/// Continental US geographic bounds (map views)
pub const US_MIN_LAT: f64 = 24.5;
pub const US_MAX_LAT: f64 = 49.5;
pub const US_MIN_LNG: f64 = -125.0;
pub const US_MAX_LNG: f64 = -66.5;

/// Temporal binning
pub const HOURS_PER_DAY: usize = 24;

/// Reporting defaults
pub const MAP_SAMPLE_SIZE: usize = 50_000;
pub const HIGH_ACCIDENT_THRESHOLD: u64 = 1000;
pub const DEFAULT_MIN_MISSING_PERCENT: f64 = 1.0;
pub const DEFAULT_TOP_CITIES: usize = 10;

/// Bucket for rows whose city field is absent
pub const UNKNOWN_CITY: &str = "(unknown)";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
