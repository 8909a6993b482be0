use crate::error::Result;
use crate::models::{ClimateRecord, ColdDay};
use crate::readers::RecordSource;
use crate::utils::constants::DEFAULT_TOP_K;
use crate::utils::temperature::{compare_temperatures, round_to_tenth};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Ranks the days of one year by the mean of every station's mean temperature
pub struct ColdestDaysSelector {
    top_k: usize,
}

impl ColdestDaysSelector {
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Load `year` from `source` and select its coldest days
    pub fn select<S: RecordSource + ?Sized>(&self, year: i32, source: &S) -> Result<Vec<ColdDay>> {
        let records = source.records_for_year(year)?;
        self.select_from(&records)
    }

    /// Coldest days, coldest first. Ties are broken by the earlier date and
    /// fewer than `top_k` days yields all of them. Any mean temperature that
    /// cannot be repaired fails the whole selection.
    pub fn select_from(&self, records: &[ClimateRecord]) -> Result<Vec<ColdDay>> {
        let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

        for record in records {
            let temperature = record.mean_temperature()?;
            by_date.entry(record.date).or_default().push(temperature);
        }

        let mut daily_means: Vec<(NaiveDate, f64)> = by_date
            .into_iter()
            .map(|(date, temperatures)| (date, mean(temperatures)))
            .collect();

        daily_means.sort_by(|(a_date, a_mean), (b_date, b_mean)| {
            compare_temperatures(*a_mean, *b_mean).then_with(|| a_date.cmp(b_date))
        });
        daily_means.truncate(self.top_k);

        Ok(daily_means
            .into_iter()
            .map(|(date, mean)| ColdDay {
                date,
                mean_temperature: round_to_tenth(mean),
            })
            .collect())
    }
}

impl Default for ColdestDaysSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Arithmetic mean, summed in sorted order so the result does not depend on
/// the order rows arrived in
fn mean(mut temperatures: Vec<f64>) -> f64 {
    temperatures.sort_by(f64::total_cmp);
    let count = temperatures.len() as f64;
    temperatures.iter().sum::<f64>() / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::readers::YearlyRecords;

    fn record(station: &str, day: u32, t_mean: &str) -> ClimateRecord {
        let date = NaiveDate::from_ymd_opt(2016, 1, day).unwrap();
        ClimateRecord::new(station, date, None, t_mean)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, d).unwrap()
    }

    #[test]
    fn test_five_coldest_of_seven_days() {
        let mut records = Vec::new();
        for (d, mean) in [(1, "-3.0"), (2, "-8.0"), (3, "1.0"), (4, "-10.0"), (5, "-1.0"), (6, "2.0"), (7, "-5.0")] {
            records.push(record("15090", d, mean));
            records.push(record("15280", d, mean));
        }

        let result = ColdestDaysSelector::new().select_from(&records).unwrap();
        let dates: Vec<NaiveDate> = result.iter().map(|d| d.date).collect();

        assert_eq!(result.len(), 5);
        assert_eq!(dates, vec![day(4), day(2), day(7), day(1), day(5)]);
        assert!(result.windows(2).all(|w| w[0].mean_temperature <= w[1].mean_temperature));
        assert!(!dates.contains(&day(3)));
        assert!(!dates.contains(&day(6)));
    }

    #[test]
    fn test_mean_across_stations_with_repair() {
        let records = vec![
            record("15090", 7, "-.7"),
            record("15280", 7, "-20.0"),
            record("15420", 7, ".4"),
        ];

        let result = ColdestDaysSelector::new().select_from(&records).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].date, day(7));
        assert_eq!(result[0].mean_temperature, -6.8);
    }

    #[test]
    fn test_ties_broken_by_earliest_date() {
        let records = vec![
            record("15090", 9, "-4.0"),
            record("15090", 3, "-4.0"),
            record("15090", 5, "-4.0"),
        ];

        let result = ColdestDaysSelector::new()
            .with_top_k(2)
            .select_from(&records)
            .unwrap();

        assert_eq!(result.iter().map(|d| d.date).collect::<Vec<_>>(), vec![day(3), day(5)]);
    }

    #[test]
    fn test_fewer_days_than_requested() {
        let records = vec![record("15090", 1, "1.0"), record("15090", 2, "0.5")];

        let result = ColdestDaysSelector::new().select_from(&records).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_unrepairable_mean_fails() {
        let records = vec![record("15090", 1, "1.0"), record("15280", 2, "x")];

        match ColdestDaysSelector::new().select_from(&records) {
            Err(ProcessingError::MalformedTemperature { value, location }) => {
                assert_eq!(value, "x");
                assert_eq!(location.map(|l| l.station_id), Some("15280".to_string()));
            }
            other => panic!("expected malformed temperature, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_year() {
        let source = YearlyRecords::from_records(vec![record("15090", 1, "1.0")]);

        assert!(matches!(
            ColdestDaysSelector::new().select(2010, &source),
            Err(ProcessingError::NoDataForYear { year: 2010 })
        ));
        assert_eq!(ColdestDaysSelector::new().select(2016, &source).unwrap().len(), 1);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut records = vec![
            record("15090", 1, "-1.1"),
            record("15280", 1, "-7.3"),
            record("15420", 1, "0.2"),
            record("15090", 2, "-2.9"),
            record("15280", 2, "-3.3"),
        ];

        let selector = ColdestDaysSelector::new();
        let expected = selector.select_from(&records).unwrap();
        records.reverse();
        assert_eq!(selector.select_from(&records).unwrap(), expected);
    }
}
