use crate::error::Result;
use crate::models::{ClimateRecord, StationDirectory, YearlyMinimum};
use crate::utils::temperature::{canonical, compare_temperatures};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Lowest minimum temperature seen at one station
#[derive(Debug, Clone, Copy)]
struct StationMinimum<'a> {
    name: &'a str,
    temperature: f64,
}

/// Finds, for every year, the coldest recorded minimum and the station that
/// recorded it. Rows without a parseable `t_min` are skipped.
pub struct YearlyMinimumAggregator<'a> {
    directory: &'a StationDirectory,
}

impl<'a> YearlyMinimumAggregator<'a> {
    pub fn new(directory: &'a StationDirectory) -> Self {
        Self { directory }
    }

    /// Aggregate records spanning any number of years. The output is
    /// ascending by year; years without a single usable `t_min` are absent.
    pub fn aggregate<'r, I>(&self, records: I) -> Result<Vec<YearlyMinimum>>
    where
        I: IntoIterator<Item = &'r ClimateRecord>,
    {
        let directory: &'a StationDirectory = self.directory;
        let mut by_year: BTreeMap<i32, HashMap<&'r str, StationMinimum<'a>>> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            let Some(temperature) = record.t_min.map(canonical) else {
                skipped += 1;
                continue;
            };

            let name = directory.name(&record.station_id)?;
            by_year
                .entry(record.year())
                .or_default()
                .entry(record.station_id.as_str())
                .and_modify(|current| {
                    if temperature < current.temperature {
                        current.temperature = temperature;
                    }
                })
                .or_insert(StationMinimum { name, temperature });
        }

        if skipped > 0 {
            debug!("Skipped {} rows without a usable minimum temperature", skipped);
        }

        let mut minimums: Vec<YearlyMinimum> = by_year
            .into_par_iter()
            .filter_map(|(year, stations)| coldest_station(year, &stations))
            .collect();

        minimums.sort_by_key(|m| m.year);
        Ok(minimums)
    }
}

/// Pick the coldest station of a year; ties go to the smallest station name
fn coldest_station(year: i32, stations: &HashMap<&str, StationMinimum<'_>>) -> Option<YearlyMinimum> {
    stations
        .iter()
        .min_by(|(a_id, a), (b_id, b)| {
            compare_temperatures(a.temperature, b.temperature)
                .then_with(|| a.name.cmp(b.name))
                .then_with(|| a_id.cmp(b_id))
        })
        .map(|(station_id, minimum)| YearlyMinimum {
            year,
            temperature: minimum.temperature,
            station_id: station_id.to_string(),
            station: minimum.name.to_string(),
        })
}
