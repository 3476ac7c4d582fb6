pub mod accident;
pub mod dataset;
pub(crate) mod formats;

pub use accident::{AccidentRecord, Column, DayPeriod, COLUMNS, COLUMN_COUNT};
pub use dataset::{Dataset, DatasetSummary};
