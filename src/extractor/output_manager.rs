use crate::error::{LogExtractError, Result};
use crate::extractor::TargetDate;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const OUTPUT_FILE_PREFIX: &str = "output_";
pub const OUTPUT_FILE_EXTENSION: &str = "txt";

/// Owns the output side of a run: the directory and `output_<date>.txt`.
pub struct OutputManager {
    output_directory: PathBuf,
    output_path: PathBuf,
    buffer_size: usize,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_directory: P, target: &TargetDate) -> Self {
        let output_directory = output_directory.into();
        let output_path = output_directory.join(output_file_name(target));

        Self {
            output_directory,
            output_path,
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(4096); // Minimum 4KB buffer
        self
    }

    /// Create the output directory if it is missing.
    ///
    /// A failure here is returned as `OutputDirectoryUnavailable` for the
    /// caller to report; it does not stop the run. `create_output_file` is
    /// what decides whether the location is actually usable.
    pub fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(|source| {
            LogExtractError::OutputDirectoryUnavailable {
                path: self.output_directory.clone(),
                source,
            }
        })
    }

    /// Create (or truncate) the output file.
    pub fn create_output_file(&self) -> Result<BufWriter<fs::File>> {
        let file =
            fs::File::create(&self.output_path).map_err(|source| LogExtractError::OutputNotWritable {
                path: self.output_path.clone(),
                source,
            })?;

        Ok(BufWriter::with_capacity(self.buffer_size, file))
    }

    pub fn get_output_path(&self) -> &Path {
        &self.output_path
    }
}

/// `output_<date>.txt`, with the date used verbatim.
pub fn output_file_name(target: &TargetDate) -> String {
    format!(
        "{}{}.{}",
        OUTPUT_FILE_PREFIX,
        target.as_str(),
        OUTPUT_FILE_EXTENSION
    )
}
