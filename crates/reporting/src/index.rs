use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use walkdir::WalkDir;

use podreport_core::manifest::is_report_file;
use podreport_core::{ReportIndex, MANIFEST_FILE};

use crate::store::{parse_report_stamp, write_json};

/// Orders report filenames newest first.
///
/// Stamped names sort by their trailing `YYYYmmdd-HHMM`, then by name; names
/// without a stamp come last, by name.
pub fn order_reports(mut files: Vec<String>) -> Vec<String> {
    files.sort_by(|a, b| match (parse_report_stamp(a), parse_report_stamp(b)) {
        (Some(left), Some(right)) => right.cmp(&left).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    });
    files
}

/// Lists the reports directly inside `dir`, newest first.
pub fn scan_reports(dir: &Path) -> Result<ReportIndex> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("scan report dir {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_report_file(name) {
                files.push(name.to_string());
            }
        }
    }
    Ok(ReportIndex::new(order_reports(files)))
}

/// Rewrites the manifest in `dir` from the reports found there.
pub fn rebuild_index(dir: &Path) -> Result<(ReportIndex, PathBuf)> {
    let index = scan_reports(dir)?;
    let path = dir.join(MANIFEST_FILE);
    write_json(&path, &index)?;
    info!(path = %path.display(), reports = index.len(), "report index written");
    Ok((index, path))
}
