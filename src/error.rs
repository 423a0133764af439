use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogExtractError {
    #[error("{message}")]
    Usage { message: String },

    #[error("Could not open log file: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create output directory: {}", path.display())]
    OutputDirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create output file: {}", path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl LogExtractError {
    /// Whether the run should stop. Directory creation problems are only
    /// warnings; opening the output file afterwards is the real check.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LogExtractError::OutputDirectoryUnavailable { .. })
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LogExtractError {
    fn user_message(&self) -> String {
        match self {
            LogExtractError::Usage { message } => message.trim_end().to_string(),
            LogExtractError::InputNotFound { path, source } => {
                format!("Could not open log file: {} ({})", path.display(), source)
            }
            LogExtractError::OutputDirectoryUnavailable { path, source } => {
                format!(
                    "Could not create '{}' directory ({})",
                    path.display(),
                    source
                )
            }
            LogExtractError::OutputNotWritable { path, source } => {
                format!("Could not create output file: {} ({})", path.display(), source)
            }
            LogExtractError::Config { message } => {
                // toml parse errors carry a multi-line source snippet
                let flattened: Vec<&str> = message
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect();
                format!("Configuration error: {}", flattened.join(" "))
            }
            LogExtractError::Io(e) => format!("I/O failure while scanning: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LogExtractError::InputNotFound { .. } => Some(
                "Check the log path, or point at another file with --input <PATH> or [input] log_file in logextract.toml.".to_string()
            ),
            LogExtractError::OutputDirectoryUnavailable { .. }
            | LogExtractError::OutputNotWritable { .. } => Some(
                "Ensure you have write permission for the output location, or choose another with --output-dir <DIR>.".to_string()
            ),
            LogExtractError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to create a fresh one.".to_string()
            ),
            LogExtractError::Usage { .. } => Some(
                "Run with --help for the full list of options.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LogExtractError {
    fn from(error: toml::de::Error) -> Self {
        LogExtractError::Config {
            message: error.to_string(),
        }
    }
}

/// The one-line usage synopsis printed for argument errors.
pub fn usage_line() -> String {
    format!("Usage: {} [OPTIONS] <YYYY-MM-DD>", env!("CARGO_PKG_NAME"))
}

impl From<clap::Error> for LogExtractError {
    fn from(error: clap::Error) -> Self {
        let rendered = error.render().to_string();
        tracing::debug!(kind = ?error.kind(), "argument parsing failed: {}", rendered);

        // First paragraph of clap's report, e.g. "unexpected argument '--bogus' found"
        let cause = rendered
            .lines()
            .map(str::trim)
            .take_while(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let cause = cause.strip_prefix("error:").unwrap_or(&cause).trim();

        let message = if cause.is_empty() {
            usage_line()
        } else {
            format!("{} ({})", usage_line(), cause)
        };
        LogExtractError::Usage { message }
    }
}

pub type Result<T> = std::result::Result<T, LogExtractError>;
