use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One downloadable annual report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListEntry {
    pub file_year: i32,
    pub file_name: String,
    pub file_link: String,
}

/// Download links for the annual reports, as stored in `file_list.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    entries: Vec<FileListEntry>,
}

impl FileList {
    /// The published listing repeats its first link at the end; a trailing
    /// entry with the same year as the first one is dropped.
    pub fn from_entries(mut entries: Vec<FileListEntry>) -> Result<Self> {
        for entry in &entries {
            if entry.file_name.is_empty()
                || entry.file_name.contains(['/', '\\'])
                || entry.file_name.starts_with('.')
            {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Unsafe report file name '{}' in file list",
                    entry.file_name
                )));
            }
        }

        if entries.len() > 1 && entries.first().map(|e| e.file_year) == entries.last().map(|e| e.file_year) {
            entries.pop();
        }

        Ok(Self { entries })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let entries = reader
            .deserialize::<FileListEntry>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for entry in &self.entries {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Entries for the years `start..=end`, in year order
    pub fn entries_for_years(&self, start: i32, end: i32) -> Vec<&FileListEntry> {
        let mut selected: Vec<&FileListEntry> = self
            .entries
            .iter()
            .filter(|e| (start..=end).contains(&e.file_year))
            .collect();
        selected.sort_by_key(|e| e.file_year);
        selected
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
