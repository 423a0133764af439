use crate::error::{LogExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "test_logs.txt";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// File names probed in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["logextract.toml", ".logextract.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LogExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LogExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| LogExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input) = cli_args.input {
            self.input.log_file = input.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.log_file.as_os_str().is_empty() {
            return Err(LogExtractError::Config {
                message: "Input log file path must not be empty".to_string(),
            });
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(LogExtractError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        let level = self.logging.level.trim();
        if !level.contains('=') && !level.contains(',') {
            // A bare word would otherwise be read as a target name and hide everything
            LevelFilter::from_str(level).map_err(|e| LogExtractError::Config {
                message: format!("Invalid log level '{}': {}", level, e),
            })?;
        }

        EnvFilter::try_new(level).map_err(|e| LogExtractError::Config {
            message: format!("Invalid log level '{}': {}", level, e),
        })?;

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.log_file, PathBuf::from("test_logs.txt"));
        assert_eq!(config.output.directory, PathBuf::from("output"));
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.input.log_file = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.directory = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "logextract=loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_must_name_a_level() {
        let mut config = Config::default();

        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(LogExtractError::Config { .. })));

        for level in ["off", "error", "WARN", "info", "debug", "trace", "logextract=debug", "warn,logextract=info"] {
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "{} should be accepted", level);
        }
    }

    #[test]
    fn test_sample_config_loads_back() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", Config::create_sample_config()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.input.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(loaded_config.output.directory, PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
        assert!(loaded_config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[output]\ndirectory = \"extracted\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("extracted"));
        assert_eq!(config.input.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/logextract.toml");
        assert!(matches!(result, Err(LogExtractError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_input(Some(PathBuf::from("app.log")))
            .with_output_dir(None);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.input.log_file, PathBuf::from("app.log"));
        assert_eq!(config.output.directory, PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[input]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[logging]"));
    }
}
