pub mod constants;
pub mod filename;
pub mod progress;
pub mod temperature;

pub use constants::*;
pub use filename::{report_file_name, report_path, report_year};
pub use progress::ProgressReporter;
pub use temperature::{
    canonical, compare_temperatures, parse_report_date, parse_temperature, round_to_tenth,
};
