use crate::error::{ProcessingError, Result};
use crate::models::ClimateRecord;
use std::collections::BTreeMap;

/// Supplies the records of one annual report at a time
pub trait RecordSource {
    /// Years for which a report exists, ascending
    fn available_years(&self) -> Result<Vec<i32>>;

    /// All records of `year`; `NoDataForYear` when the year has no report
    fn records_for_year(&self, year: i32) -> Result<Vec<ClimateRecord>>;
}

/// Records already held in memory, grouped by year
#[derive(Debug, Clone, Default)]
pub struct YearlyRecords {
    years: BTreeMap<i32, Vec<ClimateRecord>>,
}

impl YearlyRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records by the year of their date
    pub fn from_records(records: impl IntoIterator<Item = ClimateRecord>) -> Self {
        let mut years: BTreeMap<i32, Vec<ClimateRecord>> = BTreeMap::new();
        for record in records {
            years.entry(record.year()).or_default().push(record);
        }
        Self { years }
    }

    pub fn insert(&mut self, year: i32, records: Vec<ClimateRecord>) {
        self.years.insert(year, records);
    }

    pub fn records(&self) -> impl Iterator<Item = &ClimateRecord> {
        self.years.values().flatten()
    }

    pub fn total_records(&self) -> usize {
        self.years.values().map(Vec::len).sum()
    }

    pub fn year_count(&self) -> usize {
        self.years.len()
    }
}

impl RecordSource for YearlyRecords {
    fn available_years(&self) -> Result<Vec<i32>> {
        Ok(self.years.keys().copied().collect())
    }

    fn records_for_year(&self, year: i32) -> Result<Vec<ClimateRecord>> {
        self.years
            .get(&year)
            .cloned()
            .ok_or(ProcessingError::NoDataForYear { year })
    }
}
