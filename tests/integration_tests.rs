use chrono::NaiveDate;
use clim_report::analyzers::{ColdestDaysSelector, DateSnapshotQuery, YearlyMinimumAggregator};
use clim_report::models::StationDirectory;
use clim_report::readers::{ConcurrentReader, RecordSource, ReportDirectory};
use clim_report::ProcessingError;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "CODST,DATCLIM,TMAX,TMIN,TMED";

fn write_report(dir: &Path, year: i32, rows: &[String]) {
    let mut content = format!("{}\n", HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join(format!("climrbsn{}.csv", year)), content).expect("write report");
}

/// Every station of the built-in directory on every day of a short January
fn full_year_rows(directory: &StationDirectory, year: i32, days: u32) -> Vec<String> {
    let mut ids: Vec<&str> = directory.iter().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();

    let mut rows = Vec::new();
    for day in 1..=days {
        for (i, id) in ids.iter().enumerate() {
            let mean = day as f64 - i as f64 * 0.5;
            let min = mean - 6.0;
            rows.push(format!(
                "{},{}/01/{:02},{:.1},{:.1},{:.1}",
                id,
                year,
                day,
                mean + 6.0,
                min,
                mean
            ));
        }
    }
    rows
}

#[tokio::test]
async fn test_three_reports_from_disk() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let directory = StationDirectory::romania();

    write_report(dir.path(), 2015, &full_year_rows(&directory, 2015, 7));
    write_report(
        dir.path(),
        2016,
        &[
            "15280,2016/01/07,-15.0,-25.0,-20.3".to_string(),
            "15170,2016/01/07,-10.0,-25.0,-.7".to_string(),
            "15090,2016/01/08,2.0,,.4".to_string(),
        ],
    );
    fs::write(dir.path().join("file_list.csv"), "file_year,file_name,file_link\n").unwrap();

    let source = ReportDirectory::new(dir.path(), "climrbsn");
    assert_eq!(source.available_years().unwrap(), vec![2015, 2016]);

    // Yearly minimums: 2016 ties at -25.0, Miercurea Ciuc sorts before Varfu Omu
    let records = ConcurrentReader::new(2).read_all_years(&source, true).await.unwrap();
    let minimums = YearlyMinimumAggregator::new(&directory)
        .aggregate(records.records())
        .unwrap();

    let summary: Vec<(i32, f64, &str)> = minimums
        .iter()
        .map(|m| (m.year, m.temperature, m.station.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![(2015, -16.0, "Constanta"), (2016, -25.0, "Miercurea Ciuc")]
    );

    // Coldest days of 2015: day 1 is coldest, day 6 and 7 drop out
    let days = ColdestDaysSelector::new().select(2015, &source).unwrap();
    let dates: Vec<String> = days.iter().map(|d| d.formatted_date()).collect();
    assert_eq!(
        dates,
        vec!["01 January", "02 January", "03 January", "04 January", "05 January"]
    );
    assert_eq!(days[0].mean_temperature, -4.5);

    // Snapshot of one 2015 date lists all 23 stations
    let date = NaiveDate::from_ymd_opt(2015, 1, 3).unwrap();
    let snapshot = DateSnapshotQuery::new(&directory).query(date, &source).unwrap();
    assert_eq!(snapshot.readings.len(), 23);
    assert!(snapshot
        .readings
        .windows(2)
        .all(|w| w[0].temperature <= w[1].temperature));
}

#[test]
fn test_missing_year_is_reported() {
    let dir = TempDir::new().unwrap();
    let source = ReportDirectory::new(dir.path(), "climrbsn");
    let directory = StationDirectory::romania();

    assert!(matches!(
        ColdestDaysSelector::new().select(2016, &source),
        Err(ProcessingError::NoDataForYear { year: 2016 })
    ));

    let date = NaiveDate::from_ymd_opt(2014, 3, 18).unwrap();
    assert!(matches!(
        DateSnapshotQuery::new(&directory).query(date, &source),
        Err(ProcessingError::NoDataForYear { year: 2014 })
    ));
}

#[test]
fn test_unknown_station_in_snapshot() {
    let dir = TempDir::new().unwrap();
    write_report(
        dir.path(),
        2014,
        &[
            "15090,2014/03/18,10.0,1.0,5.5".to_string(),
            "99999,2014/03/18,10.0,1.0,4.0".to_string(),
        ],
    );

    let source = ReportDirectory::new(dir.path(), "climrbsn");
    let directory = StationDirectory::romania();
    let date = NaiveDate::from_ymd_opt(2014, 3, 18).unwrap();

    match DateSnapshotQuery::new(&directory).query(date, &source) {
        Err(ProcessingError::UnknownStation { station_id }) => assert_eq!(station_id, "99999"),
        other => panic!("expected unknown station, got {:?}", other),
    }
}

#[test]
fn test_malformed_mean_fails_coldest_days() {
    let dir = TempDir::new().unwrap();
    write_report(
        dir.path(),
        2016,
        &[
            "15090,2016/01/07,1.0,-1.0,-0.5".to_string(),
            "15280,2016/01/07,1.0,-1.0,?".to_string(),
        ],
    );

    let source = ReportDirectory::new(dir.path(), "climrbsn");
    let err = ColdestDaysSelector::new().select(2016, &source).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Malformed temperature '?' (station 15280 on 2016/01/07)"
    );
}

#[test]
fn test_reports_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let directory = StationDirectory::romania();
    let mut rows = full_year_rows(&directory, 2015, 5);
    write_report(dir.path(), 2015, &rows);

    let source = ReportDirectory::new(dir.path(), "climrbsn");
    let first = ColdestDaysSelector::new().select(2015, &source).unwrap();
    let date = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    let first_snapshot = DateSnapshotQuery::new(&directory).query(date, &source).unwrap();

    rows.reverse();
    write_report(dir.path(), 2015, &rows);

    assert_eq!(ColdestDaysSelector::new().select(2015, &source).unwrap(), first);
    assert_eq!(
        DateSnapshotQuery::new(&directory).query(date, &source).unwrap(),
        first_snapshot
    );
}
