//! Report persistence: one pretty-printed JSON document, written once.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use bylinescout_common::Report;

pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;

    info!(
        path = %path.display(),
        authors = report.authors.len(),
        "Report written"
    );
    Ok(())
}
