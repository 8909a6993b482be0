use crate::error::{ProcessingError, Result};
use crate::models::ClimateRecord;
use crate::readers::{RecordSource, ReportDirectory, YearlyRecords};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use tracing::{info, warn};

/// Loads every annual report of a directory using a bounded worker pool
pub struct ConcurrentReader {
    max_workers: usize,
}

impl ConcurrentReader {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Read all years on the blocking thread pool, with a progress bar unless `silent`
    pub async fn read_all_years(&self, directory: &ReportDirectory, silent: bool) -> Result<YearlyRecords> {
        let directory = directory.clone();
        let max_workers = self.max_workers;

        tokio::task::spawn_blocking(move || {
            let progress = ProgressReporter::new(0, "Reading annual reports...", silent);
            let records = ConcurrentReader::new(max_workers)
                .read_all_years_blocking(&directory, Some(&progress));
            progress.finish_and_clear();
            records
        })
        .await?
    }

    /// Read all years of `source` in parallel. The result does not depend on
    /// worker count or completion order.
    pub fn read_all_years_blocking<S>(
        &self,
        source: &S,
        progress: Option<&ProgressReporter>,
    ) -> Result<YearlyRecords>
    where
        S: RecordSource + Sync,
    {
        let years = source.available_years()?;
        if let Some(p) = progress {
            p.set_length(years.len() as u64);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()?;

        let loaded: Vec<(i32, Option<Vec<ClimateRecord>>)> = pool.install(|| {
            years
                .par_iter()
                .map(|&year| {
                    let records = match source.records_for_year(year) {
                        Ok(records) => Some(records),
                        Err(ProcessingError::NoDataForYear { .. }) => None,
                        Err(e) => return Err(e),
                    };
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    Ok((year, records))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut yearly = YearlyRecords::new();
        for (year, records) in loaded {
            match records {
                Some(records) => yearly.insert(year, records),
                None => warn!("No report could be loaded for {}, leaving it out", year),
            }
        }

        info!(
            "Loaded {} records across {} years",
            yearly.total_records(),
            yearly.year_count()
        );

        Ok(yearly)
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_all_years() -> Result<()> {
        let dir = TempDir::new()?;
        for year in [2014, 2015, 2016] {
            fs::write(
                dir.path().join(format!("climrbsn{}.csv", year)),
                format!(
                    "CODST,DATCLIM,TMIN,TMED\n15090,{y}/01/07,-1.0,0.5\n15280,{y}/01/07,-2.0,.4\n",
                    y = year
                ),
            )?;
        }

        let directory = ReportDirectory::new(dir.path(), "climrbsn");
        let sequential = ConcurrentReader::new(1).read_all_years_blocking(&directory, None)?;
        let parallel = ConcurrentReader::new(4).read_all_years_blocking(&directory, None)?;

        assert_eq!(sequential.available_years()?, vec![2014, 2015, 2016]);
        assert_eq!(sequential.total_records(), 6);
        for year in [2014, 2015, 2016] {
            assert_eq!(
                sequential.records_for_year(year)?,
                parallel.records_for_year(year)?
            );
        }
        Ok(())
    }

    /// Lists a year it cannot deliver
    struct GappySource(YearlyRecords);

    impl RecordSource for GappySource {
        fn available_years(&self) -> Result<Vec<i32>> {
            Ok(vec![2015, 2016])
        }

        fn records_for_year(&self, year: i32) -> Result<Vec<ClimateRecord>> {
            self.0.records_for_year(year)
        }
    }

    #[test]
    fn test_undeliverable_year_is_left_out() -> Result<()> {
        let date = chrono::NaiveDate::from_ymd_opt(2016, 1, 7).unwrap();
        let source = GappySource(YearlyRecords::from_records(vec![ClimateRecord::new(
            "15090",
            date,
            Some(-1.0),
            "0.5",
        )]));

        let records = ConcurrentReader::new(2).read_all_years_blocking(&source, None)?;

        assert_eq!(records.available_years()?, vec![2016]);
        assert_eq!(records.total_records(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_read_all_years_async() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(
            dir.path().join("climrbsn2016.csv"),
            "CODST,DATCLIM,TMIN,TMED\n15090,2016/01/07,-1.0,0.5\n",
        )?;

        let directory = ReportDirectory::new(dir.path(), "climrbsn");
        let records = ConcurrentReader::new(2).read_all_years(&directory, true).await?;

        assert_eq!(records.total_records(), 1);
        Ok(())
    }
}
