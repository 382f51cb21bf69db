//! JSON output of a network layout.

use crate::layout::{LayoutExports, NetworkLayout};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct LayoutFile<'a> {
    #[serde(flatten)]
    layout: &'a NetworkLayout,
    exports: LayoutExports,
}

/// Default output file name, dated like `network_layout_2026-10-19.json`.
pub fn default_layout_path() -> String {
    format!(
        "network_layout_{}.json",
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// Render the layout and its exports as pretty JSON.
pub fn layout_json(layout: &NetworkLayout) -> Result<String, Box<dyn Error>> {
    let file = LayoutFile {
        layout,
        exports: layout.exports(),
    };
    serde_json::to_string_pretty(&file).map_err(|e| format!("Error serializing layout: {e}").into())
}

/// Write the layout to `path`, or to [`default_layout_path`] when `None`.
///
/// # Returns
/// * `Ok(String)` - The path written
pub fn write_layout(layout: &NetworkLayout, path: Option<&str>) -> Result<String, Box<dyn Error>> {
    let path = path.map(String::from).unwrap_or_else(default_layout_path);
    let json = layout_json(layout)?;
    std::fs::write(&path, json).map_err(|e| format!("Error writing layout file {path}: {e}"))?;
    log::info!("Wrote network layout to {path}");
    Ok(path)
}
