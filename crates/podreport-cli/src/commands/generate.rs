use std::path::PathBuf;

use anyhow::Result;
use time::OffsetDateTime;
use tracing::info;

use podreport_core::config::Config;
use reporting::generate::{generate, GenerateOutcome, GenerateRequest};
use reporting::human::summary;
use runner::Kubectl;

pub fn execute(
    config: &Config,
    context: String,
    namespace: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let kubectl = Kubectl::new(&config.generate.kubectl, &context);
    let request = GenerateRequest {
        context,
        namespace,
        output_dir: output.unwrap_or_else(|| config.generate.output_dir.clone()),
    };
    info!(context = %request.context, namespace = %request.namespace, "generating report");

    // Local time; UTC when the local offset is unknown.
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    match generate(&kubectl, &request, now)? {
        GenerateOutcome::NoPods => {
            println!("No pods found in namespace '{}'.", request.namespace);
        }
        GenerateOutcome::Saved {
            report_path,
            pods,
            index,
        } => {
            println!("Report saved to {}", report_path.display());
            println!("{}", summary(&pods));
            println!("Index now lists {} reports.", index.len());
        }
    }
    Ok(())
}
