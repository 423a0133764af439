use clap::Parser;
use logextract::{
    logging, Cli, LogExtract, LogExtractError, LogExtractor, OutputFormatter, OutputMode,
    UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e),
    };

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let logextract = match LogExtract::from_cli(&cli) {
        Ok(logextract) => logextract,
        Err(e) => {
            logging::init(cli.verbosity_level(), None);
            print_startup_error(&e, cli.verbosity_level());
            return 1;
        }
    };

    logging::init(
        cli.verbosity_level(),
        Some(logextract.config().logging.level.as_str()),
    );

    let Some(date) = cli.date.as_deref() else {
        print_startup_error(
            &LogExtractError::Usage {
                message: logextract::error::usage_line(),
            },
            cli.verbosity_level(),
        );
        return 1;
    };

    if cli.dry_run {
        return handle_dry_run(date, &logextract);
    }

    match logextract.extract_logs(date) {
        Ok(report) => {
            logextract
                .output_formatter()
                .print_extraction_report(&report);
            0
        }
        Err(e) => {
            logextract.handle_error(&e);
            1
        }
    }
}

/// `--help` and `--version` exit 0; every other parse failure is a usage
/// error and exits 1.
fn handle_parse_error(error: clap::Error) -> i32 {
    if !error.use_stderr() {
        let _ = error.print();
        return 0;
    }

    logging::init(0, None);
    print_startup_error(&LogExtractError::from(error), 0);
    1
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| logextract::config::DEFAULT_CONFIG_PATHS[0].to_string());

    match LogExtract::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            1
        }
    }
}

fn handle_dry_run(date: &str, logextract: &LogExtract) -> i32 {
    let formatter = logextract.output_formatter();
    let input = logextract.input_path();

    println!("DRY RUN: nothing will be written");
    formatter.print_separator();
    println!("  Target date:      {:?}", date);
    println!("  Input log:        {}", input.display());
    println!("  Output directory: {}", logextract.output_directory().display());
    println!("  Output file:      {}", logextract.planned_output_path(date).display());
    formatter.print_separator();

    match LogExtractor::input_size(input) {
        Some(size) if input.is_file() => {
            println!("  Input size:       {} bytes", size);
            0
        }
        _ => {
            formatter.error(&format!("Could not open log file: {}", input.display()));
            1
        }
    }
}

fn print_startup_error(error: &LogExtractError, verbose: u8) {
    let formatter = OutputFormatter::new(OutputMode::Human, verbose, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use logextract::Config;
    use std::fs;
    use tempfile::TempDir;

    fn cli_for(date: Option<&str>) -> Cli {
        Cli {
            date: date.map(str::to_string),
            input: None,
            output_dir: None,
            config: None,
            output_format: logextract::cli::OutputFormat::Plain,
            verbose: 0,
            quiet: true,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut cli = cli_for(None);
        cli.config = Some(config_path.clone());
        cli.generate_config = true;

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[input]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.input.log_file = temp_dir.path().join("test_logs.txt");
        config.output.directory = temp_dir.path().join("output");
        fs::write(&config.input.log_file, "2024-12-01 a\n").unwrap();

        let logextract = LogExtract::new(config, OutputMode::Plain, 0, true);

        assert_eq!(handle_dry_run("2024-12-01", &logextract), 0);
        assert!(!logextract.output_directory().exists());
    }

    #[test]
    fn test_dry_run_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.input.log_file = temp_dir.path().join("missing.txt");

        let logextract = LogExtract::new(config, OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run("2024-12-01", &logextract), 1);
    }
}
