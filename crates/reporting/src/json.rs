use anyhow::{Context, Result};
use serde::Serialize;

/// Renders with two-space indentation, the layout every file we write uses.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("render JSON")
}
