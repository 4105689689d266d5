//! Reading the `activities.csv` manifest into typed records.
//!
//! Column binding is positional, never name-based: Strava has changed the
//! header label text between export revisions, but the positions of the
//! fields we need have stayed fixed. The header is 10 columns in older
//! exports and 11 in newer ones, with the source filename always last.

use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

use crate::export::{ExportSource, MANIFEST_NAME};

/// One manifest row, normalized to the fields the converter needs.
///
/// Records are immutable once parsed; the manifest row order is the
/// processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: String,
    /// ISO-like date string; the first 4 characters are the year.
    pub date: String,
    /// Case-insensitive activity category, e.g. "Run".
    pub activity_type: String,
    /// Relative path to the source track file. Empty means no attached file.
    pub filename: String,
}

impl ActivityRecord {
    /// The year portion of the date, compared as a plain string.
    pub fn year(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }
}

/// Structural manifest error. Fatal: the whole run aborts before any
/// conversion begins.
#[derive(Debug, Error)]
#[error("Unexpected header in activities manifest (expecting 10 or 11 columns, found {found}): {header}")]
pub struct ManifestError {
    pub found: usize,
    pub header: String,
}

/// Read the manifest from an export into an ordered sequence of records.
///
/// In archive mode the manifest entry is extracted to a temp file first and
/// parsed from there; the temp file is released as soon as parsing ends.
pub fn read_manifest(export: &mut ExportSource) -> Result<Vec<ActivityRecord>> {
    let manifest = export.resolve(MANIFEST_NAME)?;
    parse_manifest_file(manifest.path())
}

fn parse_manifest_file(path: &Path) -> Result<Vec<ActivityRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read activities manifest: {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let width = headers.len();
    if width != 10 && width != 11 {
        return Err(ManifestError {
            found: width,
            header: headers.iter().collect::<Vec<_>>().join(","),
        }
        .into());
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("Failed to parse activities manifest row")?;
        records.push(ActivityRecord {
            id: row.get(0).unwrap_or_default().to_string(),
            date: row.get(1).unwrap_or_default().to_string(),
            activity_type: row.get(3).unwrap_or_default().to_string(),
            filename: row.get(width - 1).unwrap_or_default().to_string(),
        });
    }

    Ok(records)
}
