use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const YEARS_TEMPLATE: &str = "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} years";
const BYTES_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}";

/// Terminal progress display that can be switched off entirely with `silent`
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Bar counting report years loaded
    pub fn new(total: u64, message: &str, silent: bool) -> Self {
        Self::build(silent, message, || {
            let pb = ProgressBar::new(total);
            pb.set_style(style(YEARS_TEMPLATE).progress_chars("#>-"));
            pb
        })
    }

    pub fn new_spinner(message: &str, silent: bool) -> Self {
        Self::build(silent, message, || {
            let pb = ProgressBar::new_spinner();
            pb.set_style(style(SPINNER_TEMPLATE));
            pb
        })
    }

    fn build(silent: bool, message: &str, make: impl FnOnce() -> ProgressBar) -> Self {
        if silent {
            return Self { progress_bar: None };
        }

        let pb = make();
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self {
            progress_bar: Some(pb),
        }
    }

    pub fn set_length(&self, total: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(total);
        }
    }

    /// Switch a spinner to a byte-counting bar once the download size is known
    pub fn set_byte_length(&self, total_bytes: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(total_bytes);
            pb.set_style(style(BYTES_TEMPLATE).progress_chars("=> "));
        }
    }

    pub fn update(&self, current: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_position(current);
        }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}
