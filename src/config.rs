use std::path::PathBuf;

pub const FFMPEG_BIN_ENV_VAR: &str = "AMBIGUITY_FFMPEG_BIN";
pub const FFPROBE_BIN_ENV_VAR: &str = "AMBIGUITY_FFPROBE_BIN";
pub const OUTPUT_DIR_ENV_VAR: &str = "AMBIGUITY_OUTPUT_DIR";
const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";
const DEFAULT_FFPROBE_BIN: &str = "ffprobe";

#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG_BIN),
            ffprobe: PathBuf::from(DEFAULT_FFPROBE_BIN),
            output_dir: std::env::temp_dir(),
        }
    }
}

impl EncoderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EncoderConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        EncoderConfig {
            ffmpeg: var(FFMPEG_BIN_ENV_VAR).unwrap_or(defaults.ffmpeg),
            ffprobe: var(FFPROBE_BIN_ENV_VAR).unwrap_or(defaults.ffprobe),
            output_dir: var(OUTPUT_DIR_ENV_VAR).unwrap_or(defaults.output_dir),
        }
    }
}
