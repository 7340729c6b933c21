use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RunnerCommand {
    pub executable: PathBuf,
    pub args: Vec<String>,
}

impl RunnerCommand {
    pub fn new(executable: PathBuf, args: Vec<String>) -> Self {
        Self { executable, args }
    }

    pub fn display(&self) -> String {
        let mut rendered = self.executable.display().to_string();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }

    /// Runs the command to completion and returns its stdout.
    ///
    /// A non-zero exit is an error carrying the command's stderr.
    pub fn run_capture(&self) -> Result<String> {
        debug!(command = %self.display(), "running command");
        let output = Command::new(&self.executable)
            .args(&self.args)
            .output()
            .with_context(|| format!("spawn {}", self.display()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!(
                "{} exited with {}: {}",
                self.display(),
                output.status,
                stderr.trim()
            ));
        }
        let stdout = String::from_utf8(output.stdout)
            .with_context(|| format!("decode output of {}", self.display()))?;
        Ok(stdout)
    }
}
