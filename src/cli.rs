use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logextract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract the log lines for a single date from a flat text log")]
#[command(
    long_about = "LogExtract scans a log file once, front to back, and copies every line that \
                  starts with the given date into output/output_<DATE>.txt."
)]
#[command(after_help = "EXAMPLES:\n  \
    logextract 2024-12-01\n  \
    logextract 2024-12-01 --input /var/log/app.log --output-dir extracted\n  \
    logextract 2024-12 --output-format json\n  \
    logextract 2024-12-01 --config my-config.toml")]
pub struct Cli {
    /// Date prefix to match (YYYY-MM-DD); compared byte-for-byte against the start of each line
    #[arg(
        value_name = "YYYY-MM-DD",
        required_unless_present = "generate_config",
        allow_hyphen_values = true
    )]
    pub date: Option<String>,

    /// Log file to scan
    #[arg(short, long, help = "Log file to scan (default: test_logs.txt)")]
    pub input: Option<PathBuf>,

    /// Directory that receives output_<DATE>.txt
    #[arg(short, long, help = "Output directory (default: output)")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show the input and output paths without scanning")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input(self.input.clone())
            .with_output_dir(self.output_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("logextract").chain(args.iter().copied()))
    }

    #[test]
    fn test_date_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["2024-12-01", "2024-12-02"]).is_err());
    }

    #[test]
    fn test_date_is_taken_verbatim() {
        for date in ["2024-12-01", "2024-13-99", "2024-12-0", ""] {
            let cli = parse(&[date]).unwrap();
            assert_eq!(cli.date.as_deref(), Some(date));
        }
    }

    #[test]
    fn test_hyphenated_date_is_a_value() {
        let cli = parse(&["-2024-12-01"]).unwrap();
        assert_eq!(cli.date.as_deref(), Some("-2024-12-01"));

        let cli = parse(&["--not-a-flag"]).unwrap();
        assert_eq!(cli.date.as_deref(), Some("--not-a-flag"));

        // Known flags keep their meaning on either side of the date.
        let cli = parse(&["-v", "2024-12-01", "--dry-run"]).unwrap();
        assert_eq!(cli.date.as_deref(), Some("2024-12-01"));
        assert_eq!(cli.verbose, 1);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_generate_config_needs_no_date() {
        let cli = parse(&["--generate-config"]).unwrap();
        assert!(cli.generate_config);
        assert!(cli.date.is_none());
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = parse(&["2024-12-01", "-i", "app.log", "-o", "out"]).unwrap();
        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.input, Some(PathBuf::from("app.log")));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(parse(&["2024-12-01", "-q", "-v"]).is_err());

        let cli = parse(&["2024-12-01", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);

        let cli = parse(&["2024-12-01", "-q"]).unwrap();
        assert_eq!(cli.verbosity_level(), 0);
    }
}
