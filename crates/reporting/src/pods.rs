use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{ContainerReport, PodReport, ResourceQuantities};

#[derive(Debug, Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<Pod>,
}

#[derive(Debug, Deserialize)]
struct Pod {
    metadata: PodMetadata,
    #[serde(default)]
    spec: PodSpec,
}

#[derive(Debug, Deserialize)]
struct PodMetadata {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PodSpec {
    #[serde(default)]
    containers: Vec<ContainerSpec>,
}

#[derive(Debug, Deserialize)]
struct ContainerSpec {
    name: String,
    #[serde(default)]
    resources: Option<Resources>,
}

#[derive(Debug, Deserialize)]
struct Resources {
    #[serde(default)]
    requests: Option<BTreeMap<String, String>>,
    #[serde(default)]
    limits: Option<BTreeMap<String, String>>,
}

/// Turns `kubectl get pods -o json` output into pod reports without usage.
///
/// Pods that carry no namespace in their metadata are attributed to
/// `namespace`.
pub fn parse_pod_list(json: &str, namespace: &str) -> Result<Vec<PodReport>> {
    let list: PodList = serde_json::from_str(json).context("parse pod list JSON")?;
    let pods = list
        .items
        .into_iter()
        .map(|pod| PodReport {
            pod_name: pod.metadata.name,
            namespace: pod
                .metadata
                .namespace
                .unwrap_or_else(|| namespace.to_string()),
            containers: pod.spec.containers.into_iter().map(container_report).collect(),
        })
        .collect();
    Ok(pods)
}

fn container_report(spec: ContainerSpec) -> ContainerReport {
    let resources = spec.resources.as_ref();
    ContainerReport {
        container_name: spec.name,
        requests: ResourceQuantities::from_map(resources.and_then(|r| r.requests.as_ref())),
        limits: ResourceQuantities::from_map(resources.and_then(|r| r.limits.as_ref())),
        cpu_usage: None,
        memory_usage: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NOT_AVAILABLE;

    const POD_LIST: &str = r#"{
      "apiVersion": "v1",
      "kind": "List",
      "items": [
        {
          "metadata": {"name": "api-7d9", "namespace": "prod", "labels": {"app": "api"}},
          "spec": {
            "containers": [
              {
                "name": "api",
                "image": "registry.local/api:1.4",
                "resources": {
                  "requests": {"cpu": "250m", "memory": "256Mi"},
                  "limits": {"memory": "512Mi"}
                }
              },
              {"name": "envoy", "resources": {}}
            ]
          },
          "status": {"phase": "Running"}
        },
        {
          "metadata": {"name": "batch-1"},
          "spec": {"containers": [{"name": "job"}]}
        }
      ]
    }"#;

    #[test]
    fn extracts_requests_and_limits() {
        let pods = parse_pod_list(POD_LIST, "prod").unwrap();
        assert_eq!(pods.len(), 2);

        let api = &pods[0].containers[0];
        assert_eq!(api.container_name, "api");
        assert_eq!(api.requests.cpu, "250m");
        assert_eq!(api.requests.memory, "256Mi");
        assert_eq!(api.limits.cpu, NOT_AVAILABLE);
        assert_eq!(api.limits.memory, "512Mi");

        let envoy = &pods[0].containers[1];
        assert_eq!(envoy.requests, ResourceQuantities::default());
        assert_eq!(envoy.limits, ResourceQuantities::default());
    }

    #[test]
    fn missing_namespace_falls_back_to_requested() {
        let pods = parse_pod_list(POD_LIST, "prod").unwrap();
        assert_eq!(pods[1].namespace, "prod");
        assert_eq!(pods[1].containers[0].container_name, "job");
    }

    #[test]
    fn empty_list_has_no_pods() {
        let pods = parse_pod_list(r#"{"items": []}"#, "prod").unwrap();
        assert!(pods.is_empty());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_pod_list("No resources found", "prod").unwrap_err();
        assert!(err.to_string().contains("parse pod list JSON"));
    }
}
