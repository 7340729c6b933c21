use crate::{PodReport, NOT_AVAILABLE};

/// One-paragraph overview printed after a report is generated.
pub fn summary(pods: &[PodReport]) -> String {
    let containers: Vec<_> = pods.iter().flat_map(|pod| pod.containers.iter()).collect();
    let without_limits = containers
        .iter()
        .filter(|c| c.limits.cpu == NOT_AVAILABLE && c.limits.memory == NOT_AVAILABLE)
        .count();
    let without_usage = containers
        .iter()
        .filter(|c| c.cpu_usage.as_deref().unwrap_or(NOT_AVAILABLE) == NOT_AVAILABLE)
        .count();

    let mut lines = vec![format!(
        "{} pods, {} containers.",
        pods.len(),
        containers.len()
    )];
    if without_limits > 0 {
        lines.push(format!("{without_limits} containers have no limits set."));
    }
    if without_usage > 0 {
        lines.push(format!("{without_usage} containers have no usage sample."));
    }
    lines.join("\n")
}
