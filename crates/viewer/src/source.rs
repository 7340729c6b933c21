use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::LoadError;

/// Where reports are read from.
///
/// Names handed to [`ReportSource::fetch`] are used exactly as they appear in
/// the manifest, resolved relative to the source root.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLocation {
    Http(String),
    Dir(PathBuf),
}

impl ReportLocation {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ReportLocation::Http(trimmed.to_string())
        } else {
            ReportLocation::Dir(PathBuf::from(trimmed))
        }
    }

    pub fn into_source(self) -> Result<Arc<dyn ReportSource>, LoadError> {
        match self {
            ReportLocation::Http(base) => Ok(Arc::new(HttpSource::new(&base)?)),
            ReportLocation::Dir(root) => Ok(Arc::new(DirSource::new(root))),
        }
    }
}

/// Fetches reports over HTTP, relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self, LoadError> {
        Self::with_client(base, Client::new())
    }

    pub fn with_client(base: &str, client: Client) -> Result<Self, LoadError> {
        // A base without a trailing slash would have its last segment replaced on join.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized).map_err(|err| LoadError::Location {
            location: base.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self { client, base })
    }

    pub fn resolve(&self, name: &str) -> Result<Url, LoadError> {
        self.base.join(name).map_err(|err| LoadError::Fetch {
            resource: name.to_string(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl ReportSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.resolve(name)?;
        debug!(resource = name, url = %url, "http fetch");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| LoadError::Fetch {
                resource: name.to_string(),
                message: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                resource: name.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(|err| LoadError::Fetch {
            resource: name.to_string(),
            message: err.to_string(),
        })?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Reads reports from a local directory, typically the generator's output.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ReportSource for DirSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(name);
        debug!(resource = name, path = %path.display(), "file fetch");
        tokio::fs::read(&path)
            .await
            .map_err(|err| LoadError::Fetch {
                resource: name.to_string(),
                message: err.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

pub const MEMORY_MISSING_MESSAGE: &str = "no such resource";

/// In-memory source that also records every requested name.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, body: impl Into<Vec<u8>>) {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(name.into(), body.into());
    }

    pub fn insert_json(&self, name: impl Into<String>, value: &serde_json::Value) {
        self.insert(name, value.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ReportSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(name.to_string());
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(name).cloned().ok_or_else(|| LoadError::Fetch {
            resource: name.to_string(),
            message: MEMORY_MISSING_MESSAGE.to_string(),
        })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parsing() {
        assert_eq!(
            ReportLocation::parse("https://example.com/reports"),
            ReportLocation::Http("https://example.com/reports".to_string())
        );
        assert_eq!(
            ReportLocation::parse(" output "),
            ReportLocation::Dir(PathBuf::from("output"))
        );
    }

    #[test]
    fn http_names_resolve_relative_to_base() {
        let source = HttpSource::new("http://localhost:8000/output").unwrap();
        let url = source.resolve("index_data.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/output/index_data.json");

        let source = HttpSource::new("http://localhost:8000/output/").unwrap();
        let url = source.resolve("report-a.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/output/report-a.json");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpSource::new("http://").unwrap_err();
        assert!(matches!(err, LoadError::Location { .. }));
    }

    #[tokio::test]
    async fn dir_source_reads_relative_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report-a.json"), b"{\"ok\":true}").unwrap();
        let source = DirSource::new(dir.path());

        let body = source.fetch("report-a.json").await.unwrap();
        assert_eq!(body, b"{\"ok\":true}");

        let err = source.fetch("report-missing.json").await.unwrap_err();
        assert_eq!(err.resource(), "report-missing.json");
        assert!(matches!(err, LoadError::Fetch { .. }));
    }

    #[tokio::test]
    async fn memory_source_records_requests() {
        let source = MemorySource::new();
        source.insert("a.json", "[]");
        assert!(source.fetch("a.json").await.is_ok());
        assert!(source.fetch("b.json").await.is_err());
        assert_eq!(source.requests(), vec!["a.json", "b.json"]);
    }
}
