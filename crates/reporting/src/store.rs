use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::info;

use podreport_core::manifest::{REPORT_PREFIX, REPORT_SUFFIX};

use crate::json::render_json;
use crate::PodReport;

pub const POD_DATA_FILE: &str = "pod_data.json";
pub const USAGE_DATA_FILE: &str = "usage_data.json";

const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year][month][day]-[hour][minute]");
const STAMP_LEN: usize = "YYYYmmdd-HHMM".len();

pub fn report_stamp(at: OffsetDateTime) -> Result<String> {
    at.format(STAMP_FORMAT).context("format report timestamp")
}

/// `report-<context>-<namespace>-<YYYYmmdd-HHMM>.json`
pub fn report_filename(context: &str, namespace: &str, at: OffsetDateTime) -> Result<String> {
    let stamp = report_stamp(at)?;
    Ok(format!("{REPORT_PREFIX}{context}-{namespace}-{stamp}{REPORT_SUFFIX}"))
}

/// Reads the trailing timestamp back out of a report filename.
pub fn parse_report_stamp(filename: &str) -> Option<PrimitiveDateTime> {
    let stem = filename.strip_suffix(REPORT_SUFFIX)?;
    let start = stem.len().checked_sub(STAMP_LEN)?;
    let stamp = stem.get(start..)?;
    PrimitiveDateTime::parse(stamp, STAMP_FORMAT).ok()
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    let contents = render_json(value)?;
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn save_report(
    output_dir: &Path,
    context: &str,
    namespace: &str,
    at: OffsetDateTime,
    pods: &[PodReport],
) -> Result<PathBuf> {
    let filename = report_filename(context, namespace, at)?;
    let path = output_dir.join(filename);
    write_json(&path, pods)?;
    info!(path = %path.display(), pods = pods.len(), "report saved");
    Ok(path)
}
