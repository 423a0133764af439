use crate::error::{LogExtractError, Result, UserFriendlyError};
use crate::extractor::line_filter::{filter_lines, FilterStats, TargetDate};
use crate::extractor::output_manager::OutputManager;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub lines_scanned: u64,
    pub lines_matched: u64,
    pub bytes_scanned: u64,
    pub total_bytes: u64,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            lines_scanned: 0,
            lines_matched: 0,
            bytes_scanned: 0,
            total_bytes,
            start_time: Instant::now(),
        }
    }

    pub fn update(&mut self, stats: &FilterStats) {
        self.lines_scanned = stats.lines_scanned;
        self.lines_matched = stats.lines_matched;
        self.bytes_scanned = stats.bytes_scanned;
    }

    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            0.0
        } else {
            (self.bytes_scanned as f64 / self.total_bytes as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub target_date: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub lines_scanned: u64,
    pub lines_matched: u64,
    pub bytes_scanned: u64,
    pub bytes_written: u64,
    pub extraction_duration: Duration,
    pub extraction_time: DateTime<Utc>,
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// The one line printed on success.
    pub fn confirmation(&self) -> String {
        format!(
            "Logs for {} have been written to: {}",
            self.target_date,
            self.output_path.display()
        )
    }
}

/// Single forward pass over one log file into one output file.
pub struct LogExtractor {
    buffer_size: usize,
}

impl LogExtractor {
    pub fn new() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }

    /// Size of the input in bytes, if it can be determined up front.
    pub fn input_size(input_path: &Path) -> Option<u64> {
        std::fs::metadata(input_path).ok().map(|m| m.len())
    }

    pub fn extract(
        &self,
        target: &TargetDate,
        input_path: &Path,
        output_directory: &Path,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionReport> {
        let mut warnings = Vec::new();

        // Input first: a missing log must leave no output behind.
        let input = File::open(input_path).map_err(|source| LogExtractError::InputNotFound {
            path: input_path.to_path_buf(),
            source,
        })?;
        let total_bytes = input.metadata().map(|m| m.len()).unwrap_or(0);
        let mut reader = BufReader::with_capacity(self.buffer_size, input);

        let output_manager =
            OutputManager::new(output_directory, target).with_buffer_size(self.buffer_size);

        match output_manager.ensure_directory() {
            Ok(()) => {}
            Err(e) if !e.is_fatal() => {
                let reason = std::error::Error::source(&e)
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                tracing::warn!(%reason, "{}", e);
                warnings.push(e.user_message());
            }
            Err(e) => return Err(e),
        }

        let mut writer = output_manager.create_output_file()?;

        tracing::info!(
            date = %target,
            input = %input_path.display(),
            output = %output_manager.get_output_path().display(),
            "scanning log file"
        );

        let mut progress = ExtractionProgress::new(total_bytes);
        let stats = filter_lines(target, &mut reader, &mut writer, |stats| {
            progress.update(stats);
            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        })?;
        writer.flush()?;

        tracing::info!(
            lines_scanned = stats.lines_scanned,
            lines_matched = stats.lines_matched,
            "scan complete"
        );

        Ok(ExtractionReport {
            target_date: target.to_string(),
            input_path: input_path.to_path_buf(),
            output_path: output_manager.get_output_path().to_path_buf(),
            lines_scanned: stats.lines_scanned,
            lines_matched: stats.lines_matched,
            bytes_scanned: stats.bytes_scanned,
            bytes_written: stats.bytes_written,
            extraction_duration: progress.elapsed(),
            extraction_time: Utc::now(),
            warnings,
        })
    }
}

impl Default for LogExtractor {
    fn default() -> Self {
        Self::new()
    }
}
