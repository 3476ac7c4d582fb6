use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::formats;
use crate::utils::constants::{MAX_SEVERITY, MIN_SEVERITY};

/// Day/night classification carried by the four twilight columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPeriod {
    Day,
    Night,
}

/// One row of the US accidents table.
///
/// Field names map onto the source file's 47 headers via serde renames, so
/// the same struct drives both the CSV parse and the binary snapshot.
/// Numeric and free-text columns that carry missing values in the source are
/// `Option`; identifiers, timestamps and coordinates of the start point are
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Severity")]
    pub severity: u8,

    #[serde(rename = "Start_Time", with = "formats::timestamp")]
    pub start_time: NaiveDateTime,

    #[serde(rename = "End_Time", with = "formats::timestamp")]
    pub end_time: NaiveDateTime,

    #[serde(rename = "Start_Lat")]
    pub start_lat: f64,

    #[serde(rename = "Start_Lng")]
    pub start_lng: f64,

    #[serde(rename = "End_Lat")]
    pub end_lat: Option<f64>,

    #[serde(rename = "End_Lng")]
    pub end_lng: Option<f64>,

    #[serde(rename = "Distance(mi)")]
    pub distance_mi: Option<f64>,

    #[serde(rename = "Description")]
    pub description: Option<String>,

    #[serde(rename = "Number")]
    pub number: Option<f64>,

    #[serde(rename = "Street")]
    pub street: Option<String>,

    #[serde(rename = "Side")]
    pub side: Option<String>,

    #[serde(rename = "City")]
    pub city: Option<String>,

    #[serde(rename = "County")]
    pub county: Option<String>,

    #[serde(rename = "State")]
    pub state: Option<String>,

    #[serde(rename = "Zipcode")]
    pub zipcode: Option<String>,

    #[serde(rename = "Country")]
    pub country: Option<String>,

    #[serde(rename = "Timezone")]
    pub timezone: Option<String>,

    #[serde(rename = "Airport_Code")]
    pub airport_code: Option<String>,

    #[serde(rename = "Weather_Timestamp", with = "formats::opt_timestamp")]
    pub weather_timestamp: Option<NaiveDateTime>,

    #[serde(rename = "Temperature(F)")]
    pub temperature_f: Option<f64>,

    #[serde(rename = "Wind_Chill(F)")]
    pub wind_chill_f: Option<f64>,

    #[serde(rename = "Humidity(%)")]
    pub humidity_pct: Option<f64>,

    #[serde(rename = "Pressure(in)")]
    pub pressure_in: Option<f64>,

    #[serde(rename = "Visibility(mi)")]
    pub visibility_mi: Option<f64>,

    #[serde(rename = "Wind_Direction")]
    pub wind_direction: Option<String>,

    #[serde(rename = "Wind_Speed(mph)")]
    pub wind_speed_mph: Option<f64>,

    #[serde(rename = "Precipitation(in)")]
    pub precipitation_in: Option<f64>,

    #[serde(rename = "Weather_Condition")]
    pub weather_condition: Option<String>,

    #[serde(rename = "Amenity", with = "formats::py_bool")]
    pub amenity: bool,

    #[serde(rename = "Bump", with = "formats::py_bool")]
    pub bump: bool,

    #[serde(rename = "Crossing", with = "formats::py_bool")]
    pub crossing: bool,

    #[serde(rename = "Give_Way", with = "formats::py_bool")]
    pub give_way: bool,

    #[serde(rename = "Junction", with = "formats::py_bool")]
    pub junction: bool,

    #[serde(rename = "No_Exit", with = "formats::py_bool")]
    pub no_exit: bool,

    #[serde(rename = "Railway", with = "formats::py_bool")]
    pub railway: bool,

    #[serde(rename = "Roundabout", with = "formats::py_bool")]
    pub roundabout: bool,

    #[serde(rename = "Station", with = "formats::py_bool")]
    pub station: bool,

    #[serde(rename = "Stop", with = "formats::py_bool")]
    pub stop: bool,

    #[serde(rename = "Traffic_Calming", with = "formats::py_bool")]
    pub traffic_calming: bool,

    #[serde(rename = "Traffic_Signal", with = "formats::py_bool")]
    pub traffic_signal: bool,

    #[serde(rename = "Turning_Loop", with = "formats::py_bool")]
    pub turning_loop: bool,

    #[serde(rename = "Sunrise_Sunset")]
    pub sunrise_sunset: Option<DayPeriod>,

    #[serde(rename = "Civil_Twilight")]
    pub civil_twilight: Option<DayPeriod>,

    #[serde(rename = "Nautical_Twilight")]
    pub nautical_twilight: Option<DayPeriod>,

    #[serde(rename = "Astronomical_Twilight")]
    pub astronomical_twilight: Option<DayPeriod>,
}

impl AccidentRecord {
    /// Minimal record with the always-present columns; everything else is
    /// absent/false until set.
    pub fn new(
        id: impl Into<String>,
        severity: u8,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_lat: f64,
        start_lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            start_time,
            end_time,
            start_lat,
            start_lng,
            end_lat: None,
            end_lng: None,
            distance_mi: None,
            description: None,
            number: None,
            street: None,
            side: None,
            city: None,
            county: None,
            state: None,
            zipcode: None,
            country: None,
            timezone: None,
            airport_code: None,
            weather_timestamp: None,
            temperature_f: None,
            wind_chill_f: None,
            humidity_pct: None,
            pressure_in: None,
            visibility_mi: None,
            wind_direction: None,
            wind_speed_mph: None,
            precipitation_in: None,
            weather_condition: None,
            amenity: false,
            bump: false,
            crossing: false,
            give_way: false,
            junction: false,
            no_exit: false,
            railway: false,
            roundabout: false,
            station: false,
            stop: false,
            traffic_calming: false,
            traffic_signal: false,
            turning_loop: false,
            sunrise_sunset: None,
            civil_twilight: None,
            nautical_twilight: None,
            astronomical_twilight: None,
        }
    }

    pub fn is_valid_severity(&self) -> bool {
        (MIN_SEVERITY..=MAX_SEVERITY).contains(&self.severity)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.is_valid_severity() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Severity {} is outside valid range [{}, {}] for record {}",
                self.severity, MIN_SEVERITY, MAX_SEVERITY, self.id
            )));
        }

        Ok(())
    }

    /// Hour-of-day of the start timestamp (0-23).
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub fn start_weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Saturday/Sunday by the local start timestamp. Timestamps span multiple
    /// time zones but are treated as a comparable local frame.
    pub fn is_weekend(&self) -> bool {
        self.start_weekday().num_days_from_monday() >= 5
    }
}

/// A named column with its absence predicate, for per-column profiling.
pub struct Column {
    pub name: &'static str,
    pub is_absent: fn(&AccidentRecord) -> bool,
}

/// All 47 source columns in header order.
pub const COLUMNS: &[Column] = &[
    Column { name: "ID", is_absent: |_| false },
    Column { name: "Severity", is_absent: |_| false },
    Column { name: "Start_Time", is_absent: |_| false },
    Column { name: "End_Time", is_absent: |_| false },
    Column { name: "Start_Lat", is_absent: |_| false },
    Column { name: "Start_Lng", is_absent: |_| false },
    Column { name: "End_Lat", is_absent: |r| r.end_lat.is_none() },
    Column { name: "End_Lng", is_absent: |r| r.end_lng.is_none() },
    Column { name: "Distance(mi)", is_absent: |r| r.distance_mi.is_none() },
    Column { name: "Description", is_absent: |r| r.description.is_none() },
    Column { name: "Number", is_absent: |r| r.number.is_none() },
    Column { name: "Street", is_absent: |r| r.street.is_none() },
    Column { name: "Side", is_absent: |r| r.side.is_none() },
    Column { name: "City", is_absent: |r| r.city.is_none() },
    Column { name: "County", is_absent: |r| r.county.is_none() },
    Column { name: "State", is_absent: |r| r.state.is_none() },
    Column { name: "Zipcode", is_absent: |r| r.zipcode.is_none() },
    Column { name: "Country", is_absent: |r| r.country.is_none() },
    Column { name: "Timezone", is_absent: |r| r.timezone.is_none() },
    Column { name: "Airport_Code", is_absent: |r| r.airport_code.is_none() },
    Column { name: "Weather_Timestamp", is_absent: |r| r.weather_timestamp.is_none() },
    Column { name: "Temperature(F)", is_absent: |r| r.temperature_f.is_none() },
    Column { name: "Wind_Chill(F)", is_absent: |r| r.wind_chill_f.is_none() },
    Column { name: "Humidity(%)", is_absent: |r| r.humidity_pct.is_none() },
    Column { name: "Pressure(in)", is_absent: |r| r.pressure_in.is_none() },
    Column { name: "Visibility(mi)", is_absent: |r| r.visibility_mi.is_none() },
    Column { name: "Wind_Direction", is_absent: |r| r.wind_direction.is_none() },
    Column { name: "Wind_Speed(mph)", is_absent: |r| r.wind_speed_mph.is_none() },
    Column { name: "Precipitation(in)", is_absent: |r| r.precipitation_in.is_none() },
    Column { name: "Weather_Condition", is_absent: |r| r.weather_condition.is_none() },
    Column { name: "Amenity", is_absent: |_| false },
    Column { name: "Bump", is_absent: |_| false },
    Column { name: "Crossing", is_absent: |_| false },
    Column { name: "Give_Way", is_absent: |_| false },
    Column { name: "Junction", is_absent: |_| false },
    Column { name: "No_Exit", is_absent: |_| false },
    Column { name: "Railway", is_absent: |_| false },
    Column { name: "Roundabout", is_absent: |_| false },
    Column { name: "Station", is_absent: |_| false },
    Column { name: "Stop", is_absent: |_| false },
    Column { name: "Traffic_Calming", is_absent: |_| false },
    Column { name: "Traffic_Signal", is_absent: |_| false },
    Column { name: "Turning_Loop", is_absent: |_| false },
    Column { name: "Sunrise_Sunset", is_absent: |r| r.sunrise_sunset.is_none() },
    Column { name: "Civil_Twilight", is_absent: |r| r.civil_twilight.is_none() },
    Column { name: "Nautical_Twilight", is_absent: |r| r.nautical_twilight.is_none() },
    Column { name: "Astronomical_Twilight", is_absent: |r| r.astronomical_twilight.is_none() },
];

pub const COLUMN_COUNT: usize = COLUMNS.len();
