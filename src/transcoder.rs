// src/transcoder.rs
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use log::{debug, error, info, trace};

use crate::config::EncoderConfig;
use crate::error::{EncodeError, Result};
use crate::job::{validate_input, EncodeJob, EncodeResult};
use crate::pipeline::compile_pipeline;
use crate::preset::resolve_preset;
use crate::probe::estimate_duration;
use crate::report::Reporter;

/// Captured output of a successful encoder run.
#[derive(Debug, Clone)]
pub struct EncoderOutput {
    pub exit_code: Option<i32>,
    pub stderr: String,
}

/// Run the encoder with captured stdout/stderr. Blocks until it exits.
pub fn run_encoder(program: &Path, args: &[OsString]) -> Result<EncoderOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    trace!("Executing FFMPEG command: {:?}", cmd);

    let Output { status, stderr, .. } = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            error!("Failed to execute {}: {}", program.display(), e);
            EncodeError::LaunchFailure {
                program: program.display().to_string(),
                source: e,
            }
        })?;

    let stderr = String::from_utf8_lossy(&stderr).into_owned();
    if status.success() {
        Ok(EncoderOutput {
            exit_code: status.code(),
            stderr,
        })
    } else {
        error!("ffmpeg command failed with status: {}", status);
        Err(EncodeError::EncodeFailure {
            exit_code: status.code(),
            stderr,
        })
    }
}

fn ensure_output_dir(output_path: &Path) -> Result<()> {
    if let Some(parent_dir) = output_path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            std::fs::create_dir_all(parent_dir).map_err(|e| EncodeError::OutputDir {
                path: parent_dir.to_path_buf(),
                source: e,
            })?;
            info!("Created output directory: {:?}", parent_dir);
        }
    }
    Ok(())
}

/// Resolve, compile and run one job, reporting the outcome through `reporter`.
///
/// Every failure is turned into a reported message and a failed result; nothing
/// escapes to the caller, so a batch can carry on with the next file.
pub fn process_video<R: Reporter + ?Sized>(
    job: &EncodeJob,
    config: &EncoderConfig,
    reporter: &R,
) -> EncodeResult {
    let job_id = job.job_id;
    info!(
        "[Job {}] Processing {:?} -> {:?}",
        job_id, job.input_path, job.output_path
    );
    debug!("[Job {}] Options: {:?}", job_id, job.options);

    if let Err(e) = validate_input(&job.input_path) {
        reporter.error(job_id, &e.to_string());
        return EncodeResult::failed(job, 0.0, &e);
    }

    let estimate = estimate_duration(&config.ffprobe, &job.input_path, job_id, reporter);

    match encode(job, config, reporter) {
        Ok(output) => {
            if job.options.verbose && !output.stderr.is_empty() {
                debug!("[Job {}] ffmpeg output:\n{}", job_id, output.stderr);
            }
            reporter.success(
                job_id,
                &format!(
                    "Video processing finished: {}",
                    job.output_path.display()
                ),
            );
            EncodeResult {
                job_id,
                output_path: job.output_path.clone(),
                succeeded: true,
                exit_code: output.exit_code,
                stderr_text: output.stderr,
                estimated_duration_seconds: estimate.duration_seconds,
                error: None,
            }
        }
        Err(e) => {
            let message = match &e {
                EncodeError::LaunchFailure { .. } | EncodeError::OutputDir { .. } => {
                    format!("An error occurred during processing: {}", e)
                }
                _ => e.to_string(),
            };
            reporter.error(job_id, &message);
            EncodeResult::failed(job, estimate.duration_seconds, &e)
        }
    }
}

fn encode<R: Reporter + ?Sized>(
    job: &EncodeJob,
    config: &EncoderConfig,
    reporter: &R,
) -> Result<EncoderOutput> {
    let preset = resolve_preset(&job.options.ambiguity)?;
    let pipeline = compile_pipeline(&preset, &job.options);
    debug!(
        "[Job {}] Preset {} compiled to {:?} with {:?}",
        job.job_id,
        preset.name(),
        pipeline.shape,
        pipeline.rate
    );

    let args = pipeline.command_args(&job.input_path, &job.output_path);
    if job.options.verbose {
        let line = std::iter::once(config.ffmpeg.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        reporter.info(job.job_id, &format!("Command: {}", line));
    }

    ensure_output_dir(&job.output_path)?;

    let output = run_encoder(&config.ffmpeg, &args)?;
    if !job.output_path.is_file() {
        return Err(EncodeError::EncodeFailure {
            exit_code: output.exit_code,
            stderr: format!(
                "encoder exited successfully but produced no file at {}\n{}",
                job.output_path.display(),
                output.stderr
            ),
        });
    }
    info!(
        "[Job {}] Transcoding successful: {:?} -> {:?}",
        job.job_id, job.input_path, job.output_path
    );
    Ok(output)
}
