// Duration probing and the processing-time estimate shown before encoding.
use std::path::Path;
use std::process::Command;

use log::{debug, warn};
use uuid::Uuid;

use crate::error::{EncodeError, Result};
use crate::report::Reporter;

/// Seconds of processing per second of source, measured on the reference machine.
pub const PROCESSING_SECONDS_PER_SOURCE_SECOND: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationEstimate {
    pub duration_seconds: f64,
    pub processing_minutes: f64,
}

impl DurationEstimate {
    pub fn from_duration(duration_seconds: f64) -> Self {
        let duration_seconds = round_tenths(duration_seconds);
        DurationEstimate {
            duration_seconds,
            processing_minutes: round_tenths(
                duration_seconds * PROCESSING_SECONDS_PER_SOURCE_SECOND / 60.0,
            ),
        }
    }
}

/// Round to one decimal using the exact decimal value, ties to even.
fn round_tenths(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Parse the bare `format=duration` value printed by ffprobe.
pub fn parse_probe_output(path: &Path, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let duration: f64 = trimmed.parse().map_err(|_| EncodeError::ProbeFailure {
        path: path.to_path_buf(),
        reason: format!("non-numeric ffprobe output: {:?}", trimmed),
    })?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(EncodeError::ProbeFailure {
            path: path.to_path_buf(),
            reason: format!("unusable duration: {}", duration),
        });
    }
    Ok(duration)
}

pub fn probe_duration(ffprobe: &Path, media_path: &Path) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(media_path)
        .output()
        .map_err(|e| EncodeError::ProbeFailure {
            path: media_path.to_path_buf(),
            reason: format!("failed to run {}: {}", ffprobe.display(), e),
        })?;

    if !output.status.success() {
        return Err(EncodeError::ProbeFailure {
            path: media_path.to_path_buf(),
            reason: format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    parse_probe_output(media_path, &String::from_utf8_lossy(&output.stdout))
}

/// Probe the input and report how long it is and roughly how long encoding will take.
///
/// Probe failures are logged and yield a zero estimate; they never fail the job.
pub fn estimate_duration<R: Reporter + ?Sized>(
    ffprobe: &Path,
    media_path: &Path,
    job_id: Uuid,
    reporter: &R,
) -> DurationEstimate {
    match probe_duration(ffprobe, media_path) {
        Ok(duration) => {
            let estimate = DurationEstimate::from_duration(duration);
            debug!("[Job {}] Probed duration: {:?}", job_id, estimate);
            reporter.info(
                job_id,
                &format!("Video length: {} seconds", estimate.duration_seconds),
            );
            reporter.info(
                job_id,
                &format!(
                    "Estimated processing time: about {} minutes",
                    estimate.processing_minutes
                ),
            );
            estimate
        }
        Err(e) => {
            warn!("[Job {}] Error getting video duration: {}", job_id, e);
            DurationEstimate::default()
        }
    }
}
