//! Runs the external commands the report generator depends on.

pub mod command;
pub mod kubectl;

pub use command::RunnerCommand;
pub use kubectl::{ClusterReader, Kubectl};
