pub mod config;
pub mod error;
pub mod manifest;

pub use config::{Config, ConfigPaths, GenerateConfig, LoggingConfig, ViewerConfig};
pub use error::PodReportError;
pub use manifest::{report_label, ReportIndex, ReportOption, MANIFEST_FILE};
