//! Format dispatch and conversion of a single track file to GPX.
//!
//! Dispatch is keyed on the source file name suffix. Compressed variants
//! decompress into a scoped temp file and recurse, so the terminal handling
//! for each format exists exactly once regardless of whether the file
//! arrived gzipped. Temp files nest with the recursion and are deleted when
//! each level returns.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::transcode::{self, TranscodeError, TranscodeInput};

/// Recognized track file formats, from the source file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    Fit,
    FitGz,
    Tcx,
    TcxGz,
    Gpx,
    GpxGz,
}

/// Suffix table checked in order. Compressed suffixes come first so a
/// `.fit.gz` file is never taken for a bare `.fit`.
const SUFFIXES: [(&str, TrackFormat); 6] = [
    (".fit.gz", TrackFormat::FitGz),
    (".tcx.gz", TrackFormat::TcxGz),
    (".gpx.gz", TrackFormat::GpxGz),
    (".fit", TrackFormat::Fit),
    (".tcx", TrackFormat::Tcx),
    (".gpx", TrackFormat::Gpx),
];

impl TrackFormat {
    /// Detect the format from a file name. Suffix match is case-sensitive;
    /// `None` means the format is unsupported.
    pub fn detect(file_name: &str) -> Option<TrackFormat> {
        SUFFIXES
            .iter()
            .find(|(suffix, _)| file_name.ends_with(suffix))
            .map(|&(_, format)| format)
    }

    /// The format obtained by stripping one `.gz` layer. Identity for the
    /// uncompressed formats.
    fn gunzipped(self) -> TrackFormat {
        match self {
            TrackFormat::FitGz => TrackFormat::Fit,
            TrackFormat::TcxGz => TrackFormat::Tcx,
            TrackFormat::GpxGz => TrackFormat::Gpx,
            other => other,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            TrackFormat::Fit => ".fit",
            TrackFormat::FitGz => ".fit.gz",
            TrackFormat::Tcx => ".tcx",
            TrackFormat::TcxGz => ".tcx.gz",
            TrackFormat::Gpx => ".gpx",
            TrackFormat::GpxGz => ".gpx.gz",
        }
    }
}

/// Terminal result of converting one source file.
///
/// The failure variants are per-record: the caller reports them and moves on
/// to the next record. Only I/O errors on the source or temp files abort the
/// run. No partial output is claimed for the failure variants.
#[derive(Debug)]
pub enum ConversionOutcome {
    /// The target file was written.
    Written,
    /// The source suffix is not in the dispatch table. No target written.
    Unsupported,
    /// gpsbabel could not be run or exited non-zero. No target claimed.
    TranscodeFailed(TranscodeError),
}

/// Convert one source track file into a GPX file at `target`.
pub fn convert(source: &Path, target: &Path) -> Result<ConversionOutcome> {
    let file_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    match TrackFormat::detect(file_name) {
        Some(format) => convert_as(format, source, target),
        None => Ok(ConversionOutcome::Unsupported),
    }
}

fn convert_as(format: TrackFormat, source: &Path, target: &Path) -> Result<ConversionOutcome> {
    debug!(?format, source = %source.display(), "converting track file");

    match format {
        TrackFormat::FitGz | TrackFormat::TcxGz | TrackFormat::GpxGz => {
            // Strip one .gz layer and recurse so the terminal rule for the
            // inner format applies exactly once.
            let inner = format.gunzipped();
            let gunzipped = gunzip_to_temp(source, inner.suffix())?;
            convert_as(inner, gunzipped.path(), target)
        }
        TrackFormat::Fit => run_transcode(TranscodeInput::Fit, source, target),
        TrackFormat::Tcx => {
            // gpsbabel rejects TCX documents with whitespace around lines,
            // so rewrite a scratch copy before handing it over.
            let scratch = copy_to_temp(source, TrackFormat::Tcx.suffix())?;
            strip_line_whitespace(scratch.path())?;
            run_transcode(TranscodeInput::Tcx, scratch.path(), target)
        }
        TrackFormat::Gpx => {
            fs::copy(source, target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    target.display()
                )
            })?;
            Ok(ConversionOutcome::Written)
        }
    }
}

fn run_transcode(
    input: TranscodeInput,
    source: &Path,
    target: &Path,
) -> Result<ConversionOutcome> {
    match transcode::transcode(input, source, target) {
        Ok(()) => Ok(ConversionOutcome::Written),
        Err(err) => Ok(ConversionOutcome::TranscodeFailed(err)),
    }
}

/// Decompress a gzip file into a fresh temp file carrying `suffix`, so the
/// recursion dispatches on the inner format.
fn gunzip_to_temp(source: &Path, suffix: &str) -> Result<NamedTempFile> {
    let file = File::open(source)
        .with_context(|| format!("Failed to open {}", source.display()))?;
    let mut decoder = GzDecoder::new(BufReader::new(file));

    let mut temp = scratch_file(suffix)?;
    io::copy(&mut decoder, temp.as_file_mut())
        .with_context(|| format!("Failed to decompress {}", source.display()))?;
    temp.as_file_mut().flush()?;

    Ok(temp)
}

fn copy_to_temp(source: &Path, suffix: &str) -> Result<NamedTempFile> {
    let mut file = File::open(source)
        .with_context(|| format!("Failed to open {}", source.display()))?;

    let mut temp = scratch_file(suffix)?;
    io::copy(&mut file, temp.as_file_mut())?;
    temp.as_file_mut().flush()?;

    Ok(temp)
}

fn scratch_file(suffix: &str) -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix("strava2gpx-")
        .suffix(suffix)
        .tempfile()
        .context("Failed to create temp file")
}

/// Rewrite a file in place with leading and trailing whitespace removed from
/// every line. Every line in the result is newline-terminated.
fn strip_line_whitespace(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut stripped = String::with_capacity(contents.len());
    for line in contents.lines() {
        stripped.push_str(line.trim());
        stripped.push('\n');
    }

    fs::write(path, stripped)
        .with_context(|| format!("Failed to rewrite {}", path.display()))
}
