use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Identifies the source row of a value that failed to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocation {
    pub station_id: String,
    pub date: NaiveDate,
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station {} on {}", self.station_id, self.date.format("%Y/%m/%d"))
    }
}

fn location_suffix(location: &Option<RecordLocation>) -> String {
    match location {
        Some(location) => format!(" ({})", location),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{value}', expected YYYY/MM/DD")]
    DateParse { value: String },

    #[error("Malformed temperature '{value}'{}", location_suffix(.location))]
    MalformedTemperature {
        value: String,
        location: Option<RecordLocation>,
    },

    #[error("No climate report available for year {year}")]
    NoDataForYear { year: i32 },

    #[error("Station {station_id} not found in station directory")]
    UnknownStation { station_id: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download error: {0}")]
    Download(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ProcessingError {
    /// Attach the offending row to a temperature parse failure
    pub fn at(self, location: RecordLocation) -> Self {
        match self {
            ProcessingError::MalformedTemperature { value, .. } => {
                ProcessingError::MalformedTemperature {
                    value,
                    location: Some(location),
                }
            }
            other => other,
        }
    }
}
