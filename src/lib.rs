pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, InputConfig, LoggingConfig, OutputConfig};
pub use error::{LogExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    filter_lines, ExtractionProgress, ExtractionReport, FilterStats, LogExtractor, OutputManager,
    TargetDate,
};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};

/// Main library interface for LogExtract functionality
pub struct LogExtract {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl LogExtract {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create LogExtract instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Scan the configured log for `date` and write the matches.
    pub fn extract_logs(&self, date: &str) -> Result<ExtractionReport> {
        let target = TargetDate::new(date);
        let input_path = self.input_path();

        self.output_formatter.start_operation(&format!(
            "Extracting {} from {}",
            if target.is_empty() { "every line" } else { target.as_str() },
            input_path.display()
        ));

        let scan_progress = self
            .progress_manager
            .create_scan_progress(LogExtractor::input_size(input_path));
        let progress_callback = {
            let pb = scan_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_scan_progress(&pb, progress);
            }
        };

        let result = LogExtractor::new().extract(
            &target,
            input_path,
            self.output_directory(),
            Some(&progress_callback),
        );

        ui::progress::finish_scan_progress(&scan_progress, scan_progress.elapsed());
        let report = result?;

        for warning in &report.warnings {
            self.output_formatter.warning(warning);
        }

        self.output_formatter.info(&format!(
            "Matched {} of {} lines",
            report.lines_matched, report.lines_scanned
        ));

        self.output_formatter.print_extraction_summary(&report);

        Ok(report)
    }

    /// Where a run for `date` would write its matches.
    pub fn planned_output_path(&self, date: &str) -> PathBuf {
        OutputManager::new(self.output_directory(), &TargetDate::new(date))
            .get_output_path()
            .to_path_buf()
    }

    pub fn input_path(&self) -> &Path {
        &self.config.input.log_file
    }

    pub fn output_directory(&self) -> &Path {
        &self.config.output.directory
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(LogExtractError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Get progress manager reference
    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &LogExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to extract one date with default settings
pub fn extract_logs_simple(
    date: &str,
    input_path: &Path,
    output_dir: &Path,
) -> Result<ExtractionReport> {
    let mut config = Config::default();
    config.input.log_file = input_path.to_path_buf();
    config.output.directory = output_dir.to_path_buf();

    LogExtract::new(config, OutputMode::Plain, 0, true).extract_logs(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_instance(temp_dir: &TempDir) -> LogExtract {
        let mut config = Config::default();
        config.input.log_file = temp_dir.path().join("test_logs.txt");
        config.output.directory = temp_dir.path().join("output");
        LogExtract::new(config, OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_logextract_creation() {
        let logextract = LogExtract::new(Config::default(), OutputMode::Human, 1, false);
        assert!(logextract.progress_manager().is_enabled());
        assert_eq!(logextract.input_path(), Path::new("test_logs.txt"));
        assert_eq!(logextract.output_directory(), Path::new("output"));

        let json = LogExtract::new(Config::default(), OutputMode::Json, 0, false);
        assert!(!json.progress_manager().is_enabled());
    }

    #[test]
    fn test_extract_logs_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let logextract = quiet_instance(&temp_dir);
        fs::write(
            logextract.input_path(),
            "2024-12-01 10:00:00 INFO A\n2024-12-02 09:00:00 INFO B\n2024-12-01 11:00:00 ERROR C\n",
        )
        .unwrap();

        let report = logextract.extract_logs("2024-12-01").unwrap();

        assert_eq!(report.output_path, logextract.planned_output_path("2024-12-01"));
        assert_eq!(
            fs::read_to_string(&report.output_path).unwrap(),
            "2024-12-01 10:00:00 INFO A\n2024-12-01 11:00:00 ERROR C\n"
        );
    }

    #[test]
    fn test_extract_logs_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let logextract = quiet_instance(&temp_dir);

        let result = logextract.extract_logs("2024-12-01");
        assert!(matches!(result, Err(LogExtractError::InputNotFound { .. })));
        assert!(!logextract.output_directory().exists());
    }

    #[test]
    fn test_extract_logs_simple() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log");
        fs::write(&input, "short\n2024-12-01 x\n").unwrap();

        let report = extract_logs_simple("", &input, &temp_dir.path().join("out")).unwrap();
        assert_eq!(report.lines_matched, 2);
        assert!(report.output_path.ends_with("output_.txt"));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        LogExtract::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[input]"));
        assert!(content.contains("[output]"));
        assert!(content.contains("[logging]"));
    }
}
