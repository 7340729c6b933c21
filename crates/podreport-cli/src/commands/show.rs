use std::sync::Arc;

use anyhow::{Context, Result};

use podreport_core::config::Config;
use podreport_core::ReportOption;
use viewer::{MemorySurface, ReportLocation, ReportSource, Viewer};

pub fn execute(config: &Config, source: Option<String>, report: Option<String>) -> Result<()> {
    let viewer = open_viewer(config, source.as_deref())?;
    let surface = MemorySurface::new();
    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;

    match report {
        Some(report) => {
            runtime.block_on(viewer.load_report(&report, &surface));
        }
        None => {
            runtime.block_on(viewer.load_index(&surface, &surface));
        }
    }

    print!("{}", render_listing(&surface.options(), &surface.text()));
    Ok(())
}

/// Builds a viewer for `--source`, or the configured source when absent.
pub fn open_viewer(config: &Config, source: Option<&str>) -> Result<Viewer<dyn ReportSource>> {
    let location = ReportLocation::parse(source.unwrap_or(&config.viewer.source));
    let source: Arc<dyn ReportSource> = location
        .into_source()
        .context("open report source")?;
    Ok(Viewer::new(source).with_manifest(config.viewer.manifest.clone()))
}

pub fn render_listing(options: &[ReportOption], text: &str) -> String {
    let mut rendered = String::new();
    if !options.is_empty() {
        rendered.push_str("Reports:\n");
        for (position, option) in options.iter().enumerate() {
            let marker = if position == 0 { '*' } else { ' ' };
            rendered.push_str(&format!("{marker} {}  ({})\n", option.label, option.value));
        }
        rendered.push('\n');
    }
    rendered.push_str(text);
    rendered.push('\n');
    rendered
}
