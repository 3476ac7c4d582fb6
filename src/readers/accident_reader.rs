use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::AccidentRecord;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

/// Header-driven CSV reader for the raw accidents export.
///
/// Any malformed row (column-count mismatch, unparseable field, severity out
/// of range) aborts the whole read; there is no partial recovery.
pub struct AccidentReader {
    use_mmap: bool,
}

impl AccidentReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    /// Memory-map the source instead of buffered reads. Useful for the full
    /// multi-gigabyte export.
    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    pub fn read_accidents(&self, path: &Path) -> Result<Vec<AccidentRecord>> {
        if self.use_mmap {
            self.read_accidents_mmap(path)
        } else {
            self.read_accidents_buffered(path)
        }
    }

    fn read_accidents_buffered(&self, path: &Path) -> Result<Vec<AccidentRecord>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let csv_reader = csv::Reader::from_reader(reader);

        self.collect_records(csv_reader)
    }

    fn read_accidents_mmap(&self, path: &Path) -> Result<Vec<AccidentRecord>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))?;
        let csv_reader = csv::Reader::from_reader(content.as_bytes());

        self.collect_records(csv_reader)
    }

    fn collect_records<R: std::io::Read>(
        &self,
        mut csv_reader: csv::Reader<R>,
    ) -> Result<Vec<AccidentRecord>> {
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: AccidentRecord = result?;
            record.validate()?;
            records.push(record);
        }

        debug!(rows = records.len(), "parsed raw accidents export");
        Ok(records)
    }
}

impl Default for AccidentReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayPeriod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV_HEADER: &str = "ID,Severity,Start_Time,End_Time,Start_Lat,Start_Lng,\
End_Lat,End_Lng,Distance(mi),Description,Number,Street,Side,City,County,State,Zipcode,Country,\
Timezone,Airport_Code,Weather_Timestamp,Temperature(F),Wind_Chill(F),Humidity(%),Pressure(in),\
Visibility(mi),Wind_Direction,Wind_Speed(mph),Precipitation(in),Weather_Condition,Amenity,Bump,\
Crossing,Give_Way,Junction,No_Exit,Railway,Roundabout,Station,Stop,Traffic_Calming,\
Traffic_Signal,Turning_Loop,Sunrise_Sunset,Civil_Twilight,Nautical_Twilight,Astronomical_Twilight";

    fn full_row() -> &'static str {
        "A-1,3,2016-02-08 05:46:00,2016-02-08 11:00:00,39.865147,-84.058723,\
39.865147,-84.058723,0.01,Accident on I-70 Eastbound.,3402,I-70 E,R,Dayton,Montgomery,OH,45424,US,\
US/Eastern,KFFO,2016-02-08 05:58:00,36.9,,91.0,29.68,10.0,Calm,,0.02,Light Rain,False,False,\
False,False,False,False,False,False,False,False,False,False,False,Night,Night,Night,Night"
    }

    fn sparse_row() -> &'static str {
        "A-2,2,2016-02-08 06:07:59,2016-02-08 06:37:59,39.928059,-82.831184,\
,,0.01,,,Brice Rd,L,,,OH,,US,,,,,,,,,,,,,False,False,True,False,False,False,False,False,False,\
False,False,True,False,Night,Night,Night,Day"
    }

    fn write_csv(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", CSV_HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn test_read_full_row() {
        let file = write_csv(&[full_row()]);
        let records = AccidentReader::new().read_accidents(file.path()).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "A-1");
        assert_eq!(r.severity, 3);
        assert_eq!(r.start_time.format("%Y-%m-%d %H:%M:%S").to_string(), "2016-02-08 05:46:00");
        assert_eq!(r.city.as_deref(), Some("Dayton"));
        assert_eq!(r.temperature_f, Some(36.9));
        assert_eq!(r.wind_chill_f, None);
        assert!(!r.traffic_signal);
        assert_eq!(r.sunrise_sunset, Some(DayPeriod::Night));
        assert!(r.weather_timestamp.is_some());
    }

    #[test]
    fn test_read_sparse_row() {
        let file = write_csv(&[sparse_row()]);
        let records = AccidentReader::new().read_accidents(file.path()).unwrap();

        let r = &records[0];
        assert_eq!(r.city, None);
        assert_eq!(r.end_lat, None);
        assert_eq!(r.temperature_f, None);
        assert!(r.crossing);
        assert!(r.traffic_signal);
        assert_eq!(r.astronomical_twilight, Some(DayPeriod::Day));
    }

    #[test]
    fn test_mmap_path_matches_buffered() {
        let file = write_csv(&[full_row(), sparse_row()]);

        let buffered = AccidentReader::new().read_accidents(file.path()).unwrap();
        let mapped = AccidentReader::with_mmap(true).read_accidents(file.path()).unwrap();

        assert_eq!(buffered, mapped);
    }

    #[test]
    fn test_malformed_row_aborts_read() {
        // Row with too few columns
        let file = write_csv(&["A-3,2,2016-02-08 06:07:59"]);
        assert!(AccidentReader::new().read_accidents(file.path()).is_err());
    }

    #[test]
    fn test_out_of_range_severity_aborts_read() {
        let bad = full_row().replacen("A-1,3,", "A-1,9,", 1);
        let file = write_csv(&[bad.as_str()]);
        assert!(AccidentReader::new().read_accidents(file.path()).is_err());
    }
}
