use crate::error::{ProcessingError, Result};
use crate::models::{ClimateRecord, RawRow};
use crate::utils::constants::{
    COLUMN_DATE, COLUMN_MEAN_TEMP, COLUMN_MIN_TEMP, COLUMN_STATION, DEFAULT_BUFFER_SIZE,
};
use encoding_rs::{UTF_8, WINDOWS_1250};
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Reads one annual report CSV into climate records
#[derive(Debug, Clone, Default)]
pub struct ReportReader {
    use_mmap: bool,
}

impl ReportReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read and materialise every row of a report file
    pub fn read_records(&self, path: &Path) -> Result<Vec<ClimateRecord>> {
        if self.use_mmap {
            self.read_records_mmap(path)
        } else {
            self.read_records_buffered(path)
        }
    }

    fn read_records_buffered(&self, path: &Path) -> Result<Vec<ClimateRecord>> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.records_from_bytes(&bytes, path)
    }

    fn read_records_mmap(&self, path: &Path) -> Result<Vec<ClimateRecord>> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return self.records_from_bytes(&[], path);
        }

        // The mapping is read-only and dropped before this call returns
        let mmap = unsafe { Mmap::map(&file)? };
        self.records_from_bytes(&mmap[..], path)
    }

    fn records_from_bytes(&self, bytes: &[u8], path: &Path) -> Result<Vec<ClimateRecord>> {
        let text = decode(bytes, path);
        let rows = self.parse_rows(&text)?;
        debug!("Read {} rows from {}", rows.len(), path.display());

        rows.iter().map(ClimateRecord::from_row).collect()
    }

    /// Tokenise report CSV text into raw rows, keyed by the report's column names
    pub fn parse_rows(&self, text: &str) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!("Missing column '{}' in report", name))
            })
        };

        let station_idx = column(COLUMN_STATION)?;
        let date_idx = column(COLUMN_DATE)?;
        let min_idx = column(COLUMN_MIN_TEMP)?;
        let mean_idx = column(COLUMN_MEAN_TEMP)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            // Skip rows that are entirely blank
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
            rows.push(RawRow {
                station_id: field(station_idx),
                date: field(date_idx),
                t_min: field(min_idx),
                t_mean: field(mean_idx),
            });
        }

        Ok(rows)
    }
}

/// Decode report bytes, honouring a UTF-8 BOM and falling back to Windows-1250
fn decode<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }

    warn!(
        "{} is not valid UTF-8, decoding as Windows-1250",
        path.display()
    );
    WINDOWS_1250.decode(bytes).0
}
