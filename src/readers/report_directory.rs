use crate::error::{ProcessingError, Result};
use crate::models::ClimateRecord;
use crate::readers::{RecordSource, ReportReader};
use crate::utils::filename::{report_file_name, report_path, report_year};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Annual report files stored side by side in one data directory
#[derive(Debug, Clone)]
pub struct ReportDirectory {
    data_dir: PathBuf,
    prefix: String,
    reader: ReportReader,
}

impl ReportDirectory {
    pub fn new(data_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            prefix: prefix.into(),
            reader: ReportReader::new(),
        }
    }

    pub fn with_reader(mut self, reader: ReportReader) -> Self {
        self.reader = reader;
        self
    }

    /// Every annual report in the directory, keyed by year.
    ///
    /// A year normally maps to `{prefix}{YYYY}.csv`. Any other name carrying the
    /// `clim` marker and a trailing year is accepted too; when several files
    /// claim one year the canonical name wins, then the smallest name.
    pub fn report_files(&self) -> Result<BTreeMap<i32, PathBuf>> {
        let entries = match std::fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files: BTreeMap<i32, PathBuf> = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            let Some(year) = report_year(file_name) else {
                continue;
            };

            let canonical = report_file_name(&self.prefix, year);
            match files.get(&year) {
                Some(current) if !self.prefers(file_name, current, &canonical) => {
                    debug!("Ignoring {} in favour of {}", path.display(), current.display());
                }
                _ => {
                    files.insert(year, path);
                }
            }
        }

        Ok(files)
    }

    fn prefers(&self, candidate: &str, current: &Path, canonical: &str) -> bool {
        let current = current.file_name().and_then(|f| f.to_str()).unwrap_or_default();
        if current == canonical {
            return false;
        }
        candidate == canonical || candidate < current
    }
}

impl RecordSource for ReportDirectory {
    fn available_years(&self) -> Result<Vec<i32>> {
        let years: Vec<i32> = self.report_files()?.into_keys().collect();
        debug!(
            "Found {} annual reports in {}",
            years.len(),
            self.data_dir.display()
        );

        Ok(years)
    }

    fn records_for_year(&self, year: i32) -> Result<Vec<ClimateRecord>> {
        let canonical = report_path(&self.data_dir, &self.prefix, year);
        let path = if canonical.is_file() {
            canonical
        } else {
            self.report_files()?
                .remove(&year)
                .ok_or(ProcessingError::NoDataForYear { year })?
        };

        let records = self.reader.read_records(&path)?;
        let total = records.len();
        let records: Vec<ClimateRecord> = records.into_iter().filter(|r| r.year() == year).collect();

        if records.len() < total {
            warn!(
                "Ignored {} rows dated outside {} in {}",
                total - records.len(),
                year,
                path.display()
            );
        }

        Ok(records)
    }
}
