//! JSON layout report for external renderers.

use std::path::Path;

use anyhow::{Context, Result};
use filescope_elf::ObjectFile;
use serde::Serialize;

/// Top-level layout report.
#[derive(Serialize)]
struct LayoutReport {
    file: String,
    size: u64,
    regions: Vec<RegionEntry>,
}

/// One byte-range region of the file.
#[derive(Serialize)]
struct RegionEntry {
    start: u64,
    end: u64,
    label: String,
    color: &'static str,
}

/// Serializes the region list of a decoded file as pretty-printed JSON.
pub fn layout_json(path: &Path, elf: &ObjectFile) -> Result<String> {
    let report = LayoutReport {
        file: path.display().to_string(),
        size: elf.source().len(),
        regions: elf
            .layout()
            .into_iter()
            .map(|r| RegionEntry {
                start: r.start,
                end: r.end,
                label: r.label,
                color: r.color,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("serializing layout report")
}
