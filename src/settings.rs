use crate::error::Result;
use crate::models::StationDirectory;
use crate::readers::{ReportDirectory, ReportReader, StationReader};
use crate::utils::constants::{
    DEFAULT_DATA_DIR, DEFAULT_LISTING_URL, DEFAULT_REPORT_PREFIX, DEFAULT_TOP_K, ENV_PREFIX, FILE_LIST_FILE,
    SETTINGS_FILE,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration: defaults, then `clim-report.toml`, then
/// `CLIM_REPORT_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub station_file: Option<PathBuf>,
    pub file_list: Option<PathBuf>,
    pub report_prefix: String,
    pub top_k: usize,
    pub max_workers: usize,
    /// Memory-map report files instead of buffered reads
    pub use_mmap: bool,
    /// Dataset page listing the downloadable reports
    pub listing_url: String,
}

impl Settings {
    /// Load settings; an explicit `config_path` must exist, the default file is optional
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("report_prefix", DEFAULT_REPORT_PREFIX)?
            .set_default("top_k", DEFAULT_TOP_K as i64)?
            .set_default("max_workers", num_cpus::get() as i64)?
            .set_default("use_mmap", false)?
            .set_default("listing_url", DEFAULT_LISTING_URL)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Location of the download list, `<data_dir>/file_list.csv` unless configured
    pub fn file_list_path(&self) -> PathBuf {
        self.file_list
            .clone()
            .unwrap_or_else(|| self.data_dir.join(FILE_LIST_FILE))
    }

    pub fn report_directory(&self) -> ReportDirectory {
        ReportDirectory::new(&self.data_dir, &self.report_prefix)
            .with_reader(ReportReader::with_mmap(self.use_mmap))
    }

    /// Station directory from `station_file`, or the built-in Romanian stations
    pub fn station_directory(&self) -> Result<StationDirectory> {
        match &self.station_file {
            Some(path) => StationReader::new().read_directory(path),
            None => Ok(StationDirectory::romania()),
        }
    }
}
