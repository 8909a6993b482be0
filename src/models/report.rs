use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Lowest minimum temperature of one year and where it was recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyMinimum {
    pub year: i32,
    pub temperature: f64,
    pub station_id: String,
    pub station: String,
}

impl fmt::Display for YearlyMinimum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{:.1}\t{}", self.year, self.temperature, self.station)
    }
}

/// A calendar day ranked by the mean of all stations' mean temperatures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColdDay {
    pub date: NaiveDate,
    /// Cross-station mean, rounded to one decimal place
    pub mean_temperature: f64,
}

impl ColdDay {
    pub fn formatted_date(&self) -> String {
        self.date.format("%d %B").to_string()
    }
}

impl fmt::Display for ColdDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", self.formatted_date(), self.mean_temperature)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReading {
    pub station_id: String,
    pub station: String,
    pub temperature: f64,
}

impl fmt::Display for StationReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {:.1}", self.station, self.temperature)
    }
}

/// Every station's mean temperature on one date, coldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSnapshot {
    pub date: NaiveDate,
    pub readings: Vec<StationReading>,
}

impl fmt::Display for DateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y/%m/%d"))?;
        for reading in &self.readings {
            write!(f, "\n\t{}", reading)?;
        }
        Ok(())
    }
}
