//! Downloads annual climate reports listed in a [`FileList`].

use crate::error::{ProcessingError, Result};
use crate::fetch::{fetch_listing, FileList};
use crate::utils::progress::ProgressReporter;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Outcome of a download run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct ReportDownloader {
    client: reqwest::Client,
    data_dir: PathBuf,
    silent: bool,
}

impl ReportDownloader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            data_dir: data_dir.into(),
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Load the file list at `path`, or build it from the dataset page at
    /// `listing_url` and save it to `path` when it does not exist yet
    pub async fn file_list(&self, path: &Path, listing_url: &str) -> Result<FileList> {
        if fs::try_exists(path).await? {
            return FileList::read(path);
        }

        info!("{} not found, reading report links from {}", path.display(), listing_url);
        let list = fetch_listing(&self.client, listing_url).await?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        list.write(path)?;
        Ok(list)
    }

    /// Download every listed report for `start..=end` that is not already on disk
    pub async fn download_years(&self, list: &FileList, start: i32, end: i32) -> Result<DownloadSummary> {
        if end < start {
            return Err(ProcessingError::InvalidFormat(format!(
                "End year {} is before start year {}",
                end, start
            )));
        }

        fs::create_dir_all(&self.data_dir).await?;

        let mut summary = DownloadSummary::default();
        for entry in list.entries_for_years(start, end) {
            let destination = self.data_dir.join(&entry.file_name);

            if fs::try_exists(&destination).await? {
                debug!("{} already present, skipping", destination.display());
                summary.skipped.push(destination);
                continue;
            }

            info!("Downloading {} report from {}", entry.file_year, entry.file_link);
            self.download_file(&entry.file_link, &destination).await?;
            summary.downloaded.push(destination);
        }

        Ok(summary)
    }

    /// Stream `url` into `destination`, via a `.part` file so an interrupted
    /// download never looks complete
    async fn download_file(&self, url: &str, destination: &Path) -> Result<()> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProcessingError::Download(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let name = destination
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let progress = ProgressReporter::new_spinner(&format!("Downloading {}", name), self.silent);
        if let Some(total) = response.content_length() {
            progress.set_byte_length(total);
        }

        let partial = destination.with_extension("part");
        if let Err(e) = write_stream(response, &partial, &progress).await {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                warn!("Could not remove {}: {}", partial.display(), cleanup);
            }
            return Err(e);
        }
        fs::rename(&partial, destination).await?;

        progress.finish_with_message(&format!("Saved {}", destination.display()));
        Ok(())
    }
}

async fn write_stream(response: reqwest::Response, path: &Path, progress: &ProgressReporter) -> Result<()> {
    let mut file = File::create(path).await?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        progress.update(downloaded);
    }

    file.flush().await?;
    Ok(())
}
