#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use ambiguous_world::{EncodeOptions, EncoderConfig, Reporter};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Success,
    Error,
}

/// Reporter that keeps every message for later assertions.
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<(Uuid, Kind, String)>>,
}

impl RecordingReporter {
    pub fn of_kind(&self, kind: Kind) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, m)| m.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, job_id: Uuid, message: &str) {
        self.messages.borrow_mut().push((job_id, Kind::Info, message.to_string()));
    }

    fn success(&self, job_id: Uuid, message: &str) {
        self.messages.borrow_mut().push((job_id, Kind::Success, message.to_string()));
    }

    fn error(&self, job_id: Uuid, message: &str) {
        self.messages.borrow_mut().push((job_id, Kind::Error, message.to_string()));
    }
}

static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that write and exec scripts, so no other thread forks while
/// a script is still open for writing (ETXTBSY).
pub fn serial() -> MutexGuard<'static, ()> {
    SCRIPT_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write an executable shell script into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Fake probe that prints a fixed duration.
pub fn fake_probe(dir: &Path, duration: &str) -> PathBuf {
    write_script(dir, "ffprobe", &format!("echo '{}'", duration))
}

/// Fake encoder that records its arguments and writes the output file
/// (the second-to-last argument, before `-y`).
pub fn fake_encoder(dir: &Path) -> PathBuf {
    let log = dir.join("encoder-args.txt");
    write_script(
        dir,
        "ffmpeg",
        &format!(
            r#"for a in "$@"; do printf '%s\n' "$a"; done > '{}'
n=0
for a in "$@"; do
  n=$((n+1))
  if [ $n -eq $(($# - 1)) ]; then out="$a"; fi
done
printf 'encoded' > "$out"
echo 'frame=  1800 fps=120' >&2"#,
            log.display()
        ),
    )
}

pub fn failing_encoder(dir: &Path) -> PathBuf {
    write_script(dir, "ffmpeg", "echo 'Unknown encoder libx264' >&2\nexit 1")
}

/// Arguments the fake encoder received on its last run, one per line.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("encoder-args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn config(ffmpeg: PathBuf, ffprobe: PathBuf, output_dir: &Path) -> EncoderConfig {
    EncoderConfig {
        ffmpeg,
        ffprobe,
        output_dir: output_dir.to_path_buf(),
    }
}

pub fn input_clip(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake movie bytes").unwrap();
    path
}

pub fn options_with(ambiguity: ambiguous_world::Ambiguity, mute_audio: bool) -> EncodeOptions {
    EncodeOptions {
        mute_audio,
        muffled_audio: true,
        ambiguity,
        verbose: false,
    }
}
