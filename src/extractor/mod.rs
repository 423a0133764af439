pub mod line_filter;
pub mod log_extractor;
pub mod output_manager;

pub use line_filter::{filter_lines, FilterStats, TargetDate};
pub use log_extractor::{ExtractionProgress, ExtractionReport, LogExtractor};
pub use output_manager::OutputManager;
