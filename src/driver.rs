//! Orchestration: read manifest, filter, resolve, convert, write.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::convert::{self, ConversionOutcome};
use crate::export::ExportSource;
use crate::filter::FilterConfig;
use crate::manifest::read_manifest;
use crate::naming::gpx_file_name;

/// Everything a conversion run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The export zip file or unzipped export directory.
    pub export: PathBuf,
    /// Directory the generated GPX files go into.
    pub output_dir: PathBuf,
    pub filters: FilterConfig,
    pub verbose: bool,
}

/// Convert every matching record of the export, in manifest order.
///
/// Each record is fully resolved (written, skipped, or warned about) before
/// the next one starts; nothing is accumulated in memory. Unsupported
/// formats and transcoder failures are reported and skipped, everything
/// else that goes wrong aborts the run.
pub fn run_conversion(config: &RunConfig) -> Result<()> {
    let mut export = ExportSource::open(&config.export)?;
    let records = read_manifest(&mut export)?;

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    for record in records {
        // No attached file. Skipped without a diagnostic, matching the
        // rows Strava writes for manual entries.
        if record.filename.is_empty() {
            continue;
        }

        if !config.filters.matches_year(&record) {
            if config.verbose {
                println!("Skipping {}, year={}.", record.filename, record.year());
            }
            continue;
        }

        if !config.filters.matches_type(&record) {
            if config.verbose {
                println!("Skipping {}, type={}.", record.filename, record.activity_type);
            }
            continue;
        }

        let target = config.output_dir.join(gpx_file_name(&record));
        if config.verbose {
            println!("Converting {} to {}.", record.filename, target.display());
        }

        // Resolved just-in-time, after the filters: an archive entry is
        // only extracted for records that are actually converted.
        let source = export.resolve(&record.filename)?;

        match convert::convert(source.path(), &target)? {
            ConversionOutcome::Written => {}
            ConversionOutcome::Unsupported => {
                eprintln!(
                    "Unrecognized/unsupported file format: {}",
                    record.filename
                );
            }
            ConversionOutcome::TranscodeFailed(err) => {
                eprintln!("Failed to convert {}: {}", record.filename, err);
            }
        }
    }

    Ok(())
}

/// The distinct activity types across all records, sorted, each once.
/// No filtering applies in listing mode.
pub fn list_types(export: &mut ExportSource) -> Result<Vec<String>> {
    let records = read_manifest(export)?;
    let types: BTreeSet<String> = records
        .into_iter()
        .map(|record| record.activity_type)
        .collect();
    Ok(types.into_iter().collect())
}
