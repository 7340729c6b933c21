use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod generate;
pub mod human;
pub mod index;
pub mod json;
pub mod pods;
pub mod store;
pub mod usage;

/// Placeholder for any request, limit or usage value the cluster did not report.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuantities {
    pub cpu: String,
    pub memory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerReport {
    pub container_name: String,
    pub requests: ResourceQuantities,
    pub limits: ResourceQuantities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodReport {
    pub pod_name: String,
    pub namespace: String,
    pub containers: Vec<ContainerReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUsage {
    pub cpu_usage: String,
    pub memory_usage: String,
}

/// Live usage keyed by pod name, then container name.
pub type UsageData = BTreeMap<String, BTreeMap<String, ContainerUsage>>;

impl Default for ResourceQuantities {
    fn default() -> Self {
        Self {
            cpu: NOT_AVAILABLE.to_string(),
            memory: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ResourceQuantities {
    pub fn from_map(values: Option<&BTreeMap<String, String>>) -> Self {
        let lookup = |key: &str| {
            values
                .and_then(|values| values.get(key))
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        Self {
            cpu: lookup("cpu"),
            memory: lookup("memory"),
        }
    }
}

/// Attaches usage to every container; containers without a sample get `N/A`.
pub fn combine(mut pods: Vec<PodReport>, usage: &UsageData) -> Vec<PodReport> {
    for pod in &mut pods {
        let pod_usage = usage.get(&pod.pod_name);
        for container in &mut pod.containers {
            let sample = pod_usage.and_then(|containers| containers.get(&container.container_name));
            container.cpu_usage = Some(
                sample
                    .map(|sample| sample.cpu_usage.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            );
            container.memory_usage = Some(
                sample
                    .map(|sample| sample.memory_usage.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            );
        }
    }
    pods
}
