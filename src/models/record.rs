use crate::error::{RecordLocation, Result};
use crate::utils::temperature::{canonical, parse_report_date, parse_temperature};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One tokenised report row, fields exactly as they appear in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub station_id: String,
    pub date: String,
    pub t_min: String,
    pub t_mean: String,
}

impl RawRow {
    pub fn new(
        station_id: impl Into<String>,
        date: impl Into<String>,
        t_min: impl Into<String>,
        t_mean: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date: date.into(),
            t_min: t_min.into(),
            t_mean: t_mean.into(),
        }
    }
}

/// One station-day observation.
///
/// `t_min` is `None` when the field could not be parsed; such records are only
/// excluded from minimum aggregation. `t_mean` keeps the raw text so that a
/// failure can be reported against this row when a mean is actually needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    pub station_id: String,
    pub date: NaiveDate,
    pub t_min: Option<f64>,
    t_mean: String,
}

impl ClimateRecord {
    pub fn new(
        station_id: impl Into<String>,
        date: NaiveDate,
        t_min: Option<f64>,
        t_mean: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            t_min: t_min.map(canonical),
            t_mean: t_mean.into(),
        }
    }

    /// Materialise a record from a raw row. Only the date is mandatory.
    pub fn from_row(row: &RawRow) -> Result<Self> {
        let date = parse_report_date(&row.date)?;
        let t_min = parse_temperature(&row.t_min).ok();

        Ok(Self {
            station_id: row.station_id.trim().to_string(),
            date,
            t_min,
            t_mean: row.t_mean.clone(),
        })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Mean temperature, repaired if needed; failures name this row
    pub fn mean_temperature(&self) -> Result<f64> {
        parse_temperature(&self.t_mean).map_err(|e| e.at(self.location()))
    }

    pub fn location(&self) -> RecordLocation {
        RecordLocation {
            station_id: self.station_id.clone(),
            date: self.date,
        }
    }
}
