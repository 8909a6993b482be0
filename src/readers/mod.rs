pub mod concurrent_reader;
pub mod report_directory;
pub mod report_reader;
pub mod source;
pub mod station_reader;

pub use concurrent_reader::ConcurrentReader;
pub use report_directory::ReportDirectory;
pub use report_reader::ReportReader;
pub use source::{RecordSource, YearlyRecords};
pub use station_reader::StationReader;
