//! Builds a [`FileList`] from the dataset page that publishes the annual reports.

use crate::error::{ProcessingError, Result};
use crate::fetch::{FileList, FileListEntry};
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Resource links inside the dataset's resource section
const RESOURCE_LINKS: &str = "section#dataset-resources a.resource-url-analytics";

/// Download the dataset page at `url` and extract its report links
pub async fn fetch_listing(client: &reqwest::Client, url: &str) -> Result<FileList> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ProcessingError::Download(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }

    let html = response.text().await?;
    parse_listing(&html)
}

/// Extract one entry per report link. Links whose file name does not end in a
/// year are skipped.
pub fn parse_listing(html: &str) -> Result<FileList> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(RESOURCE_LINKS)
        .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid link selector: {}", e)))?;

    let mut entries = Vec::new();
    for link in document.select(&selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let file_name = href.rsplit('/').next().unwrap_or(href);
        match link_year(file_name) {
            Some(file_year) => entries.push(FileListEntry {
                file_year,
                file_name: file_name.to_string(),
                file_link: href.to_string(),
            }),
            None => warn!("Skipping listing link without a year: {}", href),
        }
    }

    if entries.is_empty() {
        return Err(ProcessingError::Download(
            "No annual report links found on the dataset page".to_string(),
        ));
    }

    debug!("Listing holds {} report links", entries.len());
    FileList::from_entries(entries)
}

/// Last four characters of the name before its first dot, e.g. `climrbsn2016.csv`
fn link_year(file_name: &str) -> Option<i32> {
    let stem = file_name.split('.').next()?;
    let digits = stem.get(stem.len().checked_sub(4)?..)?;

    if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}
