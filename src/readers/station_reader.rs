use crate::error::Result;
use crate::models::{Station, StationDirectory};
use std::path::Path;
use tracing::debug;

/// Loads a station directory from a CSV file with an `id,name` header
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let stations = reader
            .deserialize::<Station>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Read {} stations from {}", stations.len(), path.display());
        Ok(stations)
    }

    pub fn read_directory(&self, path: &Path) -> Result<StationDirectory> {
        StationDirectory::new(self.read_stations(path)?)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
