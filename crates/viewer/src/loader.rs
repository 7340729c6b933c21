use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, info, warn};

use podreport_core::{ReportIndex, MANIFEST_FILE};

use crate::error::LoadError;
use crate::source::ReportSource;
use crate::surface::{OutputArea, SelectionControl};

pub const NO_REPORTS_MESSAGE: &str = "No reports found.";
pub const INDEX_ERROR_PREFIX: &str = "Error loading reports: ";
pub const REPORT_ERROR_PREFIX: &str = "Error loading report: ";

#[derive(Debug)]
pub enum ReportOutcome {
    Rendered,
    Failed(LoadError),
    /// A newer load was started before this one finished; nothing was shown.
    Superseded,
}

#[derive(Debug)]
pub enum IndexOutcome {
    Empty,
    Loaded { count: usize, first: ReportOutcome },
    Failed(LoadError),
    Superseded,
}

/// Drives the manifest and report loads against injected surfaces.
///
/// Every load takes a generation token when it starts. Index loads and
/// report loads are counted separately: options are replaced only by the
/// newest index load, and the output area is written only by the newest load
/// of either kind, so a slow response can never replace a newer one.
pub struct Viewer<S: ?Sized> {
    source: Arc<S>,
    manifest: String,
    generations: Arc<Mutex<Generations>>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Generations {
    index: u64,
    output: u64,
}

impl<S: ?Sized> Clone for Viewer<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            manifest: self.manifest.clone(),
            generations: Arc::clone(&self.generations),
        }
    }
}

impl<S: ReportSource + ?Sized> Viewer<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            manifest: MANIFEST_FILE.to_string(),
            generations: Arc::new(Mutex::new(Generations::default())),
        }
    }

    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Loads the manifest into `select`, then shows the first report.
    ///
    /// A report load started while the manifest is in flight keeps the
    /// output area: the options are still replaced, but the empty/error
    /// message and the first report are not shown.
    pub async fn load_index<C, O>(&self, select: &C, output: &O) -> IndexOutcome
    where
        C: SelectionControl + ?Sized,
        O: OutputArea + ?Sized,
    {
        let token = {
            let mut current = self.lock_generations();
            current.index += 1;
            current.output += 1;
            *current
        };
        debug!(resource = %self.manifest, token = token.index, "loading report index");
        let result = self.fetch_index().await;

        let index = {
            let current = self.lock_generations();
            if current.index != token.index {
                debug!(resource = %self.manifest, token = token.index, "index load superseded");
                return IndexOutcome::Superseded;
            }
            select.clear_options();
            let owns_output = current.output == token.output;
            match result {
                Ok(index) if index.is_empty() => {
                    info!(resource = %self.manifest, "report index is empty");
                    if owns_output {
                        output.set_text(NO_REPORTS_MESSAGE);
                    }
                    return IndexOutcome::Empty;
                }
                Ok(index) => {
                    for option in index.options() {
                        select.add_option(option);
                    }
                    index
                }
                Err(err) => {
                    warn!(resource = %self.manifest, error = %err, "failed to load report index");
                    if owns_output {
                        output.set_text(&format!("{INDEX_ERROR_PREFIX}{err}"));
                    }
                    return IndexOutcome::Failed(err);
                }
            }
        };

        let count = index.len();
        info!(resource = %self.manifest, count, "report index loaded");
        let Some(latest) = index.latest() else {
            return IndexOutcome::Empty;
        };
        let first = self.show_report(latest, token.output, output).await;
        IndexOutcome::Loaded { count, first }
    }

    /// Fetches `filename` and shows it pretty-printed.
    pub async fn load_report<O>(&self, filename: &str, output: &O) -> ReportOutcome
    where
        O: OutputArea + ?Sized,
    {
        let token = {
            let mut current = self.lock_generations();
            current.output += 1;
            current.output
        };
        self.show_report(filename, token, output).await
    }

    /// Selection change handler: loads the newly chosen report.
    pub async fn on_selection_change<O>(&self, value: &str, output: &O) -> ReportOutcome
    where
        O: OutputArea + ?Sized,
    {
        self.load_report(value, output).await
    }

    pub async fn fetch_index(&self) -> Result<ReportIndex, LoadError> {
        let value = self.fetch_json(&self.manifest).await?;
        ReportIndex::from_value(value).map_err(|err| LoadError::Manifest {
            resource: self.manifest.clone(),
            message: err.to_string(),
        })
    }

    async fn show_report<O>(&self, filename: &str, token: u64, output: &O) -> ReportOutcome
    where
        O: OutputArea + ?Sized,
    {
        debug!(resource = filename, token, "loading report");
        let result = self.fetch_json(filename).await.map(|value| render_json(&value));

        let current = self.lock_generations();
        if current.output != token {
            debug!(resource = filename, token, latest = current.output, "report load superseded");
            return ReportOutcome::Superseded;
        }
        match result {
            Ok(text) => {
                output.set_text(&text);
                ReportOutcome::Rendered
            }
            Err(err) => {
                warn!(resource = filename, error = %err, "failed to load report");
                output.set_text(&format!("{REPORT_ERROR_PREFIX}{err}"));
                ReportOutcome::Failed(err)
            }
        }
    }

    async fn fetch_json(&self, resource: &str) -> Result<Value, LoadError> {
        let body = self.source.fetch(resource).await?;
        serde_json::from_slice(&body).map_err(|source| LoadError::Parse {
            resource: resource.to_string(),
            source,
        })
    }

    fn lock_generations(&self) -> MutexGuard<'_, Generations> {
        self.generations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Two-space indented JSON, keys in document order.
pub fn render_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
