use crate::analyzers::{ColdestDaysSelector, DateSnapshotQuery, YearlyMinimumAggregator};
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::error::Result;
use crate::fetch::ReportDownloader;
use crate::models::{ColdDay, DateSnapshot, YearlyMinimum};
use crate::readers::ConcurrentReader;
use crate::settings::Settings;
use serde_json::json;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, Level};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(stations) = cli.stations {
        settings.station_file = Some(stations);
    }
    debug!("Settings: {:?}", settings);

    match cli.command {
        Commands::Minimums => {
            let directory = settings.station_directory()?;
            let source = settings.report_directory();

            let records = ConcurrentReader::new(settings.max_workers)
                .read_all_years(&source, cli.quiet)
                .await?;

            let minimums = YearlyMinimumAggregator::new(&directory).aggregate(records.records())?;
            print_minimums(&minimums, cli.format)?;
        }

        Commands::ColdestDays { year, count } => {
            let source = settings.report_directory();
            let count = count.unwrap_or(settings.top_k);

            let days = ColdestDaysSelector::new()
                .with_top_k(count)
                .select(year, &source)?;
            print_coldest_days(year, &days, cli.format)?;
        }

        Commands::Snapshot { date } => {
            let directory = settings.station_directory()?;
            let source = settings.report_directory();

            let snapshot = DateSnapshotQuery::new(&directory).query(date, &source)?;
            print_snapshot(&snapshot, cli.format)?;
        }

        Commands::Fetch {
            start,
            end,
            file_list,
        } => {
            let list_path = file_list.unwrap_or_else(|| settings.file_list_path());
            let downloader = ReportDownloader::new(&settings.data_dir).with_silent(cli.quiet);

            let list = downloader.file_list(&list_path, &settings.listing_url).await?;
            info!("{} reports listed in {}", list.len(), list_path.display());

            let summary = downloader
                .download_years(&list, start, end.unwrap_or(start))
                .await?;

            println!(
                "Downloaded {} reports, {} already present in {}",
                summary.downloaded.len(),
                summary.skipped.len(),
                settings.data_dir.display()
            );
        }
    }

    Ok(())
}

/// Log to `log_file` when given, otherwise to stderr so stdout carries only the report
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    let installed = match log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .try_init()
            .is_ok(),
        None => builder.with_writer(std::io::stderr).try_init().is_ok(),
    };

    if !installed {
        debug!("Logging subscriber already installed");
    }
    Ok(())
}

fn print_minimums(minimums: &[YearlyMinimum], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(minimums)?),
        OutputFormat::Text => {
            println!("Lowest temperature by year and place:");
            for minimum in minimums {
                println!("{}", minimum);
            }
        }
    }
    Ok(())
}

fn print_coldest_days(year: i32, days: &[ColdDay], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = json!({ "year": year, "days": days });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Coldest days in {}:", year);
            for day in days {
                println!("{}", day);
            }
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &DateSnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Text => println!("{}", snapshot),
    }
    Ok(())
}
