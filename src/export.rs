//! Uniform byte-stream access to a Strava export.
//!
//! An export is either a directory containing the unzipped export or the
//! original zip file downloaded from Strava. Both hold an `activities.csv`
//! manifest at the root and the per-activity track files it points to.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::ZipArchive;

/// Name of the activities manifest at the export root.
pub const MANIFEST_NAME: &str = "activities.csv";

/// An opened export location.
///
/// The archive variant keeps a single read-only zip handle open for the
/// whole run; entries are pulled out on demand via [`ExportSource::resolve`].
pub enum ExportSource {
    /// An unzipped export directory. Names resolve by joining the path.
    Directory(PathBuf),
    /// A Strava export zip file. Names resolve to archive entries.
    Archive {
        path: PathBuf,
        archive: ZipArchive<File>,
    },
}

/// A manifest entry resolved to readable bytes on disk.
///
/// In directory mode this is just the joined path. In archive mode the entry
/// has been copied into a temp file that is deleted when the locator drops,
/// so a locator never outlives the conversion it was resolved for.
pub enum SourceLocator {
    Path(PathBuf),
    Extracted(NamedTempFile),
}

impl SourceLocator {
    pub fn path(&self) -> &Path {
        match self {
            SourceLocator::Path(path) => path,
            SourceLocator::Extracted(temp) => temp.path(),
        }
    }
}

impl ExportSource {
    /// Open an export location, either a directory or a zip file.
    pub fn open(location: &Path) -> Result<Self> {
        if location.is_dir() {
            return Ok(ExportSource::Directory(location.to_path_buf()));
        }

        let file = File::open(location)
            .with_context(|| format!("Export location not found: {}", location.display()))?;
        let archive = ZipArchive::new(file)
            .with_context(|| format!("Not a valid export zip file: {}", location.display()))?;

        Ok(ExportSource::Archive {
            path: location.to_path_buf(),
            archive,
        })
    }

    /// Resolve a file named in the manifest to bytes on disk.
    pub fn resolve(&mut self, name: &str) -> Result<SourceLocator> {
        match self {
            ExportSource::Directory(dir) => Ok(SourceLocator::Path(dir.join(name))),
            ExportSource::Archive { .. } => Ok(SourceLocator::Extracted(
                self.extract_to_temp(name)?,
            )),
        }
    }

    /// Copy an archive entry into a fresh uniquely named temp file.
    ///
    /// The temp file name ends with the entry's base name so that suffix
    /// dispatch still sees the original extension. The file is deleted when
    /// the returned handle drops.
    pub fn extract_to_temp(&mut self, entry_name: &str) -> Result<NamedTempFile> {
        let (path, archive) = match self {
            ExportSource::Archive { path, archive } => (path, archive),
            ExportSource::Directory(dir) => {
                anyhow::bail!("Not an export archive: {}", dir.display())
            }
        };

        let mut entry = archive.by_name(entry_name).with_context(|| {
            format!("Entry '{}' not found in {}", entry_name, path.display())
        })?;

        let base_name = Path::new(entry_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(entry_name);

        let mut temp = tempfile::Builder::new()
            .prefix("strava2gpx-")
            .suffix(&format!("-{}", base_name))
            .tempfile()
            .context("Failed to create temp file for archive entry")?;
        io::copy(&mut entry, temp.as_file_mut())
            .with_context(|| format!("Failed to extract '{}'", entry_name))?;
        temp.as_file_mut().flush()?;

        Ok(temp)
    }
}
