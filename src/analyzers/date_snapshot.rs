use crate::error::Result;
use crate::models::{ClimateRecord, DateSnapshot, StationDirectory, StationReading};
use crate::readers::RecordSource;
use crate::utils::temperature::compare_temperatures;
use chrono::{Datelike, NaiveDate};

/// Lists every station's mean temperature on a single date, coldest first
pub struct DateSnapshotQuery<'a> {
    directory: &'a StationDirectory,
}

impl<'a> DateSnapshotQuery<'a> {
    pub fn new(directory: &'a StationDirectory) -> Self {
        Self { directory }
    }

    /// Load the year of `date` from `source` and take the snapshot
    pub fn query<S: RecordSource + ?Sized>(&self, date: NaiveDate, source: &S) -> Result<DateSnapshot> {
        let records = source.records_for_year(date.year())?;
        self.snapshot_from(date, &records)
    }

    /// Stations without a row for `date` are simply absent. A matching row
    /// with an unknown station or an unrepairable temperature fails the query.
    pub fn snapshot_from(&self, date: NaiveDate, records: &[ClimateRecord]) -> Result<DateSnapshot> {
        let mut readings = records
            .iter()
            .filter(|record| record.date == date)
            .map(|record| {
                let station = self.directory.resolve(&record.station_id)?;
                Ok(StationReading {
                    station_id: station.id.clone(),
                    station: station.name.clone(),
                    temperature: record.mean_temperature()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        readings.sort_by(|a, b| {
            compare_temperatures(a.temperature, b.temperature)
                .then_with(|| a.station.cmp(&b.station))
                .then_with(|| a.station_id.cmp(&b.station_id))
        });

        Ok(DateSnapshot { date, readings })
    }
}
