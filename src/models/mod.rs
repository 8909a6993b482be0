pub mod record;
pub mod report;
pub mod station;

pub use record::{ClimateRecord, RawRow};
pub use report::{ColdDay, DateSnapshot, StationReading, YearlyMinimum};
pub use station::{Station, StationDirectory};
