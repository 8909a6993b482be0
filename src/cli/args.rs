use crate::utils::temperature::parse_report_date;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clim-report")]
#[command(about = "Yearly minimums, coldest days and date snapshots from annual climate reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: clim-report.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the annual report CSV files")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Station directory CSV (id,name) [default: built-in]")]
    pub stations: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lowest temperature of every year and the station that recorded it
    Minimums,

    /// Coldest days of a year by the mean of all stations
    ColdestDays {
        #[arg(short, long)]
        year: i32,

        #[arg(short = 'n', long, help = "Number of days to list [default: 5]")]
        count: Option<usize>,
    },

    /// Every station's mean temperature on one date, coldest first
    Snapshot {
        #[arg(short, long, value_parser = parse_date_arg, help = "Date as YYYY/MM/DD")]
        date: NaiveDate,
    },

    /// Download annual reports listed in the file list, scraping the list from
    /// the dataset page first when it is missing
    Fetch {
        #[arg(long)]
        start: i32,

        #[arg(long, help = "Last year to download [default: start year]")]
        end: Option<i32>,

        #[arg(long, help = "Download list CSV [default: <data-dir>/file_list.csv]")]
        file_list: Option<PathBuf>,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_report_date(value).map_err(|e| e.to_string())
}
