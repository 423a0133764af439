use crate::extractor::ExtractionProgress;
use crate::ui::output::format_duration;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Hands out the scan progress bar. Bars draw on stderr and are cleared when
/// the scan ends, so stdout keeps only the confirmation line.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Byte-based bar for an input of known size; a spinner otherwise.
    pub fn create_scan_progress(&self, total_bytes: Option<u64>) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        match total_bytes {
            Some(total) if total > 0 => self.create_bytes_progress(total, "Scanning log..."),
            _ => self.create_spinner("Scanning log..."),
        }
    }

    pub fn create_bytes_progress(&self, total_bytes: u64, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_bytes);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes:>7}/{total_bytes:7} {msg}"
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_scan_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_position(progress.bytes_scanned);
    pb.set_message(format!(
        "{} lines, {} matched ({:.0}%)",
        progress.lines_scanned,
        progress.lines_matched,
        progress.percentage()
    ));
}

pub fn finish_scan_progress(pb: &ProgressBar, duration: Duration) {
    tracing::debug!(elapsed = %format_duration(duration), "scan progress finished");
    pb.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_hides_bars() {
        let manager = ProgressManager::new(false);
        assert!(!manager.is_enabled());
        assert!(manager.create_scan_progress(Some(1024)).is_hidden());
        assert!(manager.create_scan_progress(None).is_hidden());
    }

    #[test]
    fn test_update_scan_progress_tracks_bytes() {
        let pb = ProgressBar::hidden();
        pb.set_length(100);

        let mut progress = ExtractionProgress::new(100);
        progress.bytes_scanned = 40;
        progress.lines_scanned = 4;
        progress.lines_matched = 1;

        update_scan_progress(&pb, &progress);
        assert_eq!(pb.position(), 40);
        assert_eq!(pb.message(), "4 lines, 1 matched (40%)");

        finish_scan_progress(&pb, progress.elapsed());
        assert!(pb.is_finished());
    }
}
