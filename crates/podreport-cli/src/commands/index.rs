use std::path::PathBuf;

use anyhow::{Context, Result};

use podreport_core::config::Config;
use reporting::index::rebuild_index;

pub fn execute(config: &Config, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.generate.output_dir.clone());
    let (index, path) =
        rebuild_index(&dir).with_context(|| format!("rebuild index in {}", dir.display()))?;
    println!("Index written to {} ({} reports)", path.display(), index.len());
    Ok(())
}
