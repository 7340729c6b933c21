use anyhow::Result;

use podreport_core::config::Config;
use viewer::ReportSource;

use crate::commands::show::open_viewer;
use crate::tui;

pub fn execute(config: &Config, source: Option<String>) -> Result<()> {
    let viewer = open_viewer(config, source.as_deref())?;
    let source_label = viewer.source().describe();
    tui::run_tui(viewer, source_label)
}
