use crate::{ContainerUsage, UsageData};

/// Parses `kubectl top pods --containers --no-headers` output.
///
/// Each line is `POD CONTAINER CPU MEMORY`; shorter lines are skipped.
pub fn parse_top_output(output: &str) -> UsageData {
    let mut usage = UsageData::new();
    for line in output.trim().lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        usage.entry(fields[0].to_string()).or_default().insert(
            fields[1].to_string(),
            ContainerUsage {
                cpu_usage: fields[2].to_string(),
                memory_usage: fields[3].to_string(),
            },
        );
    }
    usage
}
