use thiserror::Error;

/// Why a manifest or report could not be shown.
///
/// Only the `Display` form reaches the output area; the variants exist for
/// logging and tests.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {resource}: {message}")]
    Fetch { resource: String, message: String },
    #[error("{resource} returned HTTP {status}")]
    Status { resource: String, status: u16 },
    #[error("{resource} is not valid JSON: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{resource}: {message}")]
    Manifest { resource: String, message: String },
    #[error("invalid source location {location}: {message}")]
    Location { location: String, message: String },
}

impl LoadError {
    pub fn resource(&self) -> &str {
        match self {
            LoadError::Fetch { resource, .. }
            | LoadError::Status { resource, .. }
            | LoadError::Parse { resource, .. }
            | LoadError::Manifest { resource, .. } => resource,
            LoadError::Location { location, .. } => location,
        }
    }
}
