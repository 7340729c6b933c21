use std::path::PathBuf;

use anyhow::Result;

use crate::command::RunnerCommand;

/// Read access to the cluster, as far as report generation needs it.
pub trait ClusterReader {
    /// `kubectl get pods -o json` output for `namespace`.
    fn pod_list(&self, namespace: &str) -> Result<String>;

    /// `kubectl top pods --containers --no-headers` output for `namespace`.
    fn top_pods(&self, namespace: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct Kubectl {
    pub binary: PathBuf,
    pub context: String,
}

impl Kubectl {
    pub fn new(binary: impl Into<PathBuf>, context: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            context: context.into(),
        }
    }

    pub fn pod_list_command(&self, namespace: &str) -> RunnerCommand {
        self.command(&["get", "pods", "-n", namespace, "-o", "json"])
    }

    pub fn top_pods_command(&self, namespace: &str) -> RunnerCommand {
        self.command(&["top", "pods", "-n", namespace, "--containers", "--no-headers"])
    }

    fn command(&self, args: &[&str]) -> RunnerCommand {
        let mut full = vec!["--context".to_string(), self.context.clone()];
        full.extend(args.iter().map(|arg| arg.to_string()));
        RunnerCommand::new(self.binary.clone(), full)
    }
}

impl ClusterReader for Kubectl {
    fn pod_list(&self, namespace: &str) -> Result<String> {
        self.pod_list_command(namespace).run_capture()
    }

    fn top_pods(&self, namespace: &str) -> Result<String> {
        self.top_pods_command(namespace).run_capture()
    }
}
