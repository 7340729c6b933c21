use std::path::PathBuf;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use tracing::{info, warn};

use podreport_core::ReportIndex;
use runner::ClusterReader;

use crate::index::rebuild_index;
use crate::pods::parse_pod_list;
use crate::store::{save_report, write_json, POD_DATA_FILE, USAGE_DATA_FILE};
use crate::usage::parse_top_output;
use crate::{combine, PodReport, UsageData};

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub context: String,
    pub namespace: String,
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub enum GenerateOutcome {
    NoPods,
    Saved {
        report_path: PathBuf,
        pods: Vec<PodReport>,
        index: ReportIndex,
    },
}

/// Collects pods and usage for one namespace and writes a new report.
///
/// Intermediate `pod_data.json` and `usage_data.json` land next to the
/// report. Missing usage metrics do not fail the run; every container then
/// reports `N/A`.
pub fn generate(
    reader: &dyn ClusterReader,
    request: &GenerateRequest,
    at: OffsetDateTime,
) -> Result<GenerateOutcome> {
    let namespace = request.namespace.as_str();
    let pod_json = reader
        .pod_list(namespace)
        .with_context(|| format!("list pods in namespace '{namespace}'"))?;
    let pods = parse_pod_list(&pod_json, namespace)?;
    write_json(&request.output_dir.join(POD_DATA_FILE), &pods)?;

    if pods.is_empty() {
        info!(namespace, "no pods found");
        return Ok(GenerateOutcome::NoPods);
    }

    let usage = match reader.top_pods(namespace) {
        Ok(output) => parse_top_output(&output),
        Err(err) => {
            warn!(namespace, error = %format!("{err:#}"), "usage metrics unavailable");
            UsageData::new()
        }
    };
    write_json(&request.output_dir.join(USAGE_DATA_FILE), &usage)?;

    let combined = combine(pods, &usage);
    let report_path = save_report(
        &request.output_dir,
        &request.context,
        namespace,
        at,
        &combined,
    )?;
    let (index, _) = rebuild_index(&request.output_dir)?;

    Ok(GenerateOutcome::Saved {
        report_path,
        pods: combined,
        index,
    })
}
