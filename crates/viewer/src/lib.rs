//! Report viewer: loads the manifest into a selection control and renders
//! the chosen report into an output area.
//!
//! Both UI surfaces and the report source are injected, so the loaders run
//! the same way behind the terminal viewer, the headless `show` command and
//! the tests.

pub mod error;
pub mod loader;
pub mod source;
pub mod surface;

pub use error::LoadError;
pub use loader::{IndexOutcome, ReportOutcome, Viewer, NO_REPORTS_MESSAGE};
pub use source::{DirSource, HttpSource, MemorySource, ReportLocation, ReportSource};
pub use surface::{MemorySurface, OutputArea, SelectionControl};
