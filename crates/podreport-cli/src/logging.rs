use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use podreport_core::config::LoggingConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The terminal is taken by the viewer; log to `logging.file`, else here.
    FileOnly { default_file: PathBuf },
}

pub fn init(config: &LoggingConfig, target: &LogTarget) -> Result<()> {
    let filter = build_filter(config);
    match log_file(config, target) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create log dir {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            install(filter, config.json, false, Mutex::new(file))
        }
        None => install(filter, config.json, true, std::io::stderr),
    }
}

fn log_file<'a>(config: &'a LoggingConfig, target: &'a LogTarget) -> Option<&'a Path> {
    match (&config.file, target) {
        (Some(path), _) => Some(path.as_path()),
        (None, LogTarget::FileOnly { default_file }) => Some(default_file.as_path()),
        (None, LogTarget::Stderr) => None,
    }
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn install<W>(filter: EnvFilter, json: bool, ansi: bool, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(writer);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(file: Option<&str>) -> LoggingConfig {
        LoggingConfig {
            filter: "info".to_string(),
            json: false,
            file: file.map(PathBuf::from),
        }
    }

    #[test]
    fn configured_file_wins() {
        let target = LogTarget::FileOnly {
            default_file: PathBuf::from("/data/podreport.log"),
        };
        assert_eq!(
            log_file(&logging(Some("/tmp/view.log")), &target),
            Some(Path::new("/tmp/view.log"))
        );
        assert_eq!(
            log_file(&logging(Some("/tmp/cli.log")), &LogTarget::Stderr),
            Some(Path::new("/tmp/cli.log"))
        );
    }

    #[test]
    fn viewer_falls_back_to_default_file() {
        let target = LogTarget::FileOnly {
            default_file: PathBuf::from("/data/podreport.log"),
        };
        assert_eq!(
            log_file(&logging(None), &target),
            Some(Path::new("/data/podreport.log"))
        );
        assert_eq!(log_file(&logging(None), &LogTarget::Stderr), None);
    }
}
