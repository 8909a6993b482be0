use crate::utils::constants::{REPORT_EXTENSION, REPORT_MARKER};
use std::path::{Path, PathBuf};

/// Annual report file name with format: {prefix}{YYYY}.csv
pub fn report_file_name(prefix: &str, year: i32) -> String {
    format!("{}{:04}.{}", prefix, year, REPORT_EXTENSION)
}

/// Full path of the annual report for `year` inside `data_dir`
pub fn report_path(data_dir: &Path, prefix: &str, year: i32) -> PathBuf {
    data_dir.join(report_file_name(prefix, year))
}

/// Extract the report year from a file name such as `climrbsn2016.csv`.
///
/// Returns `None` for files that are not annual climate reports.
pub fn report_year(file_name: &str) -> Option<i32> {
    if !file_name.contains(REPORT_MARKER) {
        return None;
    }

    let stem = file_name.strip_suffix(&format!(".{}", REPORT_EXTENSION))?;
    let digits = stem.get(stem.len().checked_sub(4)?..)?;

    if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}
