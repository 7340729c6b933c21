use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodReportError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid report index: {0}")]
    InvalidIndex(String),
}
