pub mod downloader;
pub mod file_list;
pub mod listing;

pub use downloader::{DownloadSummary, ReportDownloader};
pub use file_list::{FileList, FileListEntry};
pub use listing::{fetch_listing, parse_listing};
