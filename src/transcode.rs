//! Invocation of gpsbabel, the external FIT/TCX to GPX transcoder.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

/// Input kinds gpsbabel is asked to read. GPX sources never go through
/// gpsbabel, so there is no variant for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeInput {
    Fit,
    Tcx,
}

impl TranscodeInput {
    /// The gpsbabel input-format tag for this kind.
    pub fn babel_tag(self) -> &'static str {
        match self {
            TranscodeInput::Fit => "garmin_fit",
            TranscodeInput::Tcx => "gtrnctr",
        }
    }
}

/// Failure of a single transcoder invocation. Reported per record; the run
/// continues with the next record.
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("gpsbabel could not be started (is it installed?): {0}")]
    Spawn(#[source] io::Error),
    #[error("gpsbabel failed with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Run gpsbabel synchronously: `gpsbabel -i <tag> -f <input> -o gpx -F <output>`.
///
/// Blocks until the process exits; there is no timeout. A non-zero exit
/// status is surfaced as an error together with the captured stderr.
pub fn transcode(
    input: TranscodeInput,
    input_path: &Path,
    output_path: &Path,
) -> Result<(), TranscodeError> {
    debug!(tag = input.babel_tag(), input = %input_path.display(), "invoking gpsbabel");

    let output = Command::new("gpsbabel")
        .arg("-i")
        .arg(input.babel_tag())
        .arg("-f")
        .arg(input_path)
        .arg("-o")
        .arg("gpx")
        .arg("-F")
        .arg(output_path)
        .output()
        .map_err(TranscodeError::Spawn)?;

    if !output.status.success() {
        return Err(TranscodeError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn babel_tag_mapping_is_fixed() {
        assert_eq!(TranscodeInput::Fit.babel_tag(), "garmin_fit");
        assert_eq!(TranscodeInput::Tcx.babel_tag(), "gtrnctr");
    }

    #[test]
    #[cfg(unix)]
    fn failed_error_names_the_stderr() {
        use std::os::unix::process::ExitStatusExt;

        let err = TranscodeError::Failed {
            status: ExitStatus::from_raw(1 << 8),
            stderr: "Bad input".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gpsbabel failed"));
        assert!(msg.contains("Bad input"));
    }
}
