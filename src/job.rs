use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::EncodeError;
use crate::options::EncodeOptions;

/// Extensions accepted as input, compared case-insensitively.
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "qt"];
pub const OUTPUT_EXTENSION: &str = "mp4";

#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub job_id: Uuid,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub options: EncodeOptions,
}

impl EncodeJob {
    pub fn new(input_path: PathBuf, output_path: PathBuf, options: EncodeOptions) -> Self {
        EncodeJob {
            job_id: Uuid::new_v4(),
            input_path,
            output_path,
            options,
        }
    }

    /// Build a job whose output lands in `output_dir` under the effect's naming scheme.
    pub fn for_input(
        input_path: PathBuf,
        output_dir: &Path,
        date: NaiveDate,
        options: EncodeOptions,
    ) -> Self {
        let output_path = output_dir.join(output_file_name(&input_path, date));
        EncodeJob::new(input_path, output_path, options)
    }
}

/// `{stem}-EFF_{YYYYMMDD}.mp4`
pub fn output_file_name(input_path: &Path, date: NaiveDate) -> String {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "video".to_string());
    format!(
        "{}-EFF_{}.{}",
        stem,
        date.format("%Y%m%d"),
        OUTPUT_EXTENSION
    )
}

/// Give every job in a batch its own output path by suffixing repeats with `-1`, `-2`, ...
pub fn dedupe_output_paths(jobs: &mut [EncodeJob]) {
    let mut taken: HashSet<PathBuf> = HashSet::new();
    for job in jobs.iter_mut() {
        let mut candidate = job.output_path.clone();
        let mut n = 1;
        while !taken.insert(candidate.clone()) {
            candidate = numbered(&job.output_path, n);
            n += 1;
        }
        job.output_path = candidate;
    }
}

fn numbered(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}-{}.{}", stem, n, OUTPUT_EXTENSION))
}

/// Check that the input exists and has an extension the effect accepts.
pub fn validate_input(input_path: &Path) -> Result<(), EncodeError> {
    let extension_ok = input_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_VIDEO_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false);

    if !extension_ok || !input_path.is_file() {
        return Err(EncodeError::UnsupportedInput(input_path.to_path_buf()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct EncodeResult {
    pub job_id: Uuid,
    pub output_path: PathBuf,
    pub succeeded: bool,
    pub exit_code: Option<i32>,
    pub stderr_text: String,
    pub estimated_duration_seconds: f64,
    /// User-facing failure message, if the job failed.
    pub error: Option<String>,
}

impl EncodeResult {
    pub fn failed(job: &EncodeJob, estimated_duration_seconds: f64, err: &EncodeError) -> Self {
        EncodeResult {
            job_id: job.job_id,
            output_path: job.output_path.clone(),
            succeeded: false,
            exit_code: err.exit_code(),
            stderr_text: err.stderr_text().to_string(),
            estimated_duration_seconds,
            error: Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(Path::new("/uploads/holiday.mov"), date()),
            "holiday-EFF_20240309.mp4"
        );
        assert_eq!(
            output_file_name(Path::new("clip.final.MP4"), date()),
            "clip.final-EFF_20240309.mp4"
        );
    }

    #[test]
    fn test_for_input_places_output_in_dir() {
        let job = EncodeJob::for_input(
            PathBuf::from("in/a.mp4"),
            Path::new("/tmp/out"),
            date(),
            EncodeOptions::default(),
        );
        assert_eq!(job.output_path, PathBuf::from("/tmp/out/a-EFF_20240309.mp4"));
        assert_ne!(job.job_id, Uuid::nil());
    }

    #[test]
    fn test_same_stem_gets_distinct_outputs() {
        let out = Path::new("/tmp/out");
        let mut jobs: Vec<EncodeJob> = ["a/clip.mp4", "clip.mov", "b/clip.MP4", "other.mp4"]
            .into_iter()
            .map(|p| EncodeJob::for_input(PathBuf::from(p), out, date(), EncodeOptions::default()))
            .collect();
        dedupe_output_paths(&mut jobs);

        let names: Vec<String> = jobs
            .iter()
            .map(|j| j.output_path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "clip-EFF_20240309.mp4",
                "clip-EFF_20240309-1.mp4",
                "clip-EFF_20240309-2.mp4",
                "other-EFF_20240309.mp4",
            ]
        );
        assert!(jobs.iter().all(|j| j.output_path.parent() == Some(out)));
    }

    #[test]
    fn test_validate_input() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("clip.MOV");
        std::fs::write(&good, b"not really a movie").unwrap();
        assert!(validate_input(&good).is_ok());

        let wrong_ext = dir.path().join("clip.avi");
        std::fs::write(&wrong_ext, b"x").unwrap();
        assert!(matches!(
            validate_input(&wrong_ext),
            Err(EncodeError::UnsupportedInput(_))
        ));

        let missing = dir.path().join("missing.mp4");
        assert!(matches!(
            validate_input(&missing),
            Err(EncodeError::UnsupportedInput(_))
        ));
    }
}
