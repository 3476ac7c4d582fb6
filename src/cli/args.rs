use std::path::PathBuf;

use chrono::Weekday;
use clap::{Parser, Subcommand, ValueEnum};

use crate::analyzers::DaySelector;
use crate::utils::constants::{
    DEFAULT_MIN_MISSING_PERCENT, DEFAULT_SNAPSHOT_FILE, DEFAULT_SOURCE_FILE, DEFAULT_TOP_CITIES,
    HIGH_ACCIDENT_THRESHOLD, MAP_SAMPLE_SIZE,
};

#[derive(Parser)]
#[command(name = "accidents-processor")]
#[command(about = "Exploratory data-analysis processor for the US accidents dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        default_value = DEFAULT_SOURCE_FILE,
        help = "Raw CSV export path"
    )]
    pub source: PathBuf,

    #[arg(
        long,
        global = true,
        default_value = DEFAULT_SNAPSHOT_FILE,
        help = "Parsed snapshot cache path"
    )]
    pub snapshot: PathBuf,

    #[arg(long, global = true, help = "Memory-map the raw export while parsing")]
    pub mmap: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the loaded dataset
    Info,

    /// Report per-column missing-value percentages
    Profile {
        #[arg(
            long,
            default_value_t = DEFAULT_MIN_MISSING_PERCENT,
            help = "Only report columns missing more than this percentage"
        )]
        min_percent: f64,

        #[arg(long, help = "Emit the report as JSON")]
        json: bool,
    },

    /// Rank cities by accident count
    Cities {
        #[arg(long, default_value_t = DEFAULT_TOP_CITIES, help = "Rows to display")]
        top: usize,

        #[arg(
            long,
            default_value_t = HIGH_ACCIDENT_THRESHOLD,
            help = "High/low-frequency partition threshold"
        )]
        threshold: u64,

        #[arg(long, help = "Emit the full ranking as JSON")]
        json: bool,
    },

    /// Hour-of-day histogram for a weekday/weekend selection
    Hours {
        #[arg(long, value_enum, default_value = "weekdays")]
        day: DayChoice,

        #[arg(long, help = "Emit the histogram as JSON")]
        json: bool,
    },

    /// Draw a random coordinate sample for density-map rendering
    Sample {
        #[arg(short = 'n', long, default_value_t = MAP_SAMPLE_SIZE)]
        count: usize,

        #[arg(long, help = "Seed for a reproducible draw")]
        seed: Option<u64>,

        #[arg(long, help = "Restrict the draw to the continental US bounding box")]
        bounded: bool,

        #[arg(short, long, help = "Write the sampled coordinates to a JSON file")]
        output: Option<PathBuf>,
    },
}

/// Day-of-week selection, including the two aggregate views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayChoice {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    /// All weekdays combined
    Weekdays,
    /// Both weekend days combined
    Weekend,
}

impl DayChoice {
    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday | Self::Weekend)
    }

    pub fn selector(self) -> DaySelector {
        match self {
            Self::Monday => DaySelector::Day(Weekday::Mon),
            Self::Tuesday => DaySelector::Day(Weekday::Tue),
            Self::Wednesday => DaySelector::Day(Weekday::Wed),
            Self::Thursday => DaySelector::Day(Weekday::Thu),
            Self::Friday => DaySelector::Day(Weekday::Fri),
            Self::Saturday => DaySelector::Day(Weekday::Sat),
            Self::Sunday => DaySelector::Day(Weekday::Sun),
            Self::Weekdays | Self::Weekend => DaySelector::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
            Self::Weekdays => "all weekdays",
            Self::Weekend => "both weekend days",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_choice_selectors() {
        assert_eq!(
            DayChoice::Tuesday.selector(),
            DaySelector::Day(Weekday::Tue)
        );
        assert_eq!(DayChoice::Weekdays.selector(), DaySelector::All);
        assert_eq!(DayChoice::Weekend.selector(), DaySelector::All);
    }

    #[test]
    fn test_day_choice_subset() {
        assert!(!DayChoice::Friday.is_weekend());
        assert!(DayChoice::Saturday.is_weekend());
        assert!(DayChoice::Weekend.is_weekend());
        assert!(!DayChoice::Weekdays.is_weekend());
    }
}
