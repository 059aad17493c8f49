pub mod config;
pub mod error;
pub mod filters;
pub mod job;
pub mod options;
pub mod pipeline;
pub mod preset;
pub mod probe;
pub mod report;
pub mod transcoder;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub use config::EncoderConfig;
pub use error::{EncodeError, Result};
pub use job::{EncodeJob, EncodeResult};
pub use options::{Ambiguity, EncodeOptions};
pub use preset::{AmbiguityLevel, AmbiguityPreset};
pub use report::{ConsoleReporter, Reporter};
pub use transcoder::process_video;

/// One job per input file, all sharing the same options and output directory.
/// Inputs with the same file stem get numbered output names.
pub fn build_jobs(
    inputs: &[PathBuf],
    output_dir: &Path,
    date: NaiveDate,
    options: &EncodeOptions,
) -> Vec<EncodeJob> {
    let mut jobs: Vec<EncodeJob> = inputs
        .iter()
        .map(|input| EncodeJob::for_input(input.clone(), output_dir, date, options.clone()))
        .collect();
    job::dedupe_output_paths(&mut jobs);
    jobs
}

/// Process jobs strictly one after another. A failed job does not stop the rest.
pub fn process_batch<R: Reporter + ?Sized>(
    jobs: &[EncodeJob],
    config: &EncoderConfig,
    reporter: &R,
) -> Vec<EncodeResult> {
    jobs.iter()
        .map(|job| process_video(job, config, reporter))
        .collect()
}
