// src/main.rs
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info};
use tokio::signal;

use ambiguous_world::{
    build_jobs, process_batch, Ambiguity, AmbiguityLevel, ConsoleReporter, EncodeJob,
    EncodeOptions, EncodeResult, EncoderConfig,
};

#[derive(Parser)]
#[command(name = "ambiguous-world")]
#[command(about = "Video effect that turns H.264 compression noise into a look")]
struct Cli {
    /// Input videos (mov, mp4, qt)
    files: Vec<PathBuf>,
    /// Ambiguity level: Classic, Low, Mid, High or Extreme
    #[arg(short, long, default_value = "Mid")]
    ambiguity: AmbiguityLevel,
    /// Developer mode: free-text ambiguity level, implies verbose output
    #[arg(long, value_name = "TEXT")]
    dev_preset: Option<String>,
    /// Remove the audio track
    #[arg(long)]
    mute_audio: bool,
    /// Keep the full audio band instead of the muffled one
    #[arg(long)]
    no_muffle: bool,
    /// Directory for processed videos (default: $AMBIGUITY_OUTPUT_DIR or the temp dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Print one JSON result per processed file
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn encode_options(&self) -> EncodeOptions {
        let (ambiguity, verbose) = match &self.dev_preset {
            Some(raw) => (Ambiguity::Custom(raw.clone()), true),
            None => (Ambiguity::Level(self.ambiguity), false),
        };
        EncodeOptions {
            mute_audio: self.mute_audio,
            muffled_audio: !self.no_muffle,
            ambiguity,
            verbose,
        }
    }
}

async fn jobs_processing_loop(jobs: Vec<EncodeJob>, config: EncoderConfig, json: bool) -> bool {
    let job_count = jobs.len();
    // Encoding blocks; keep it off the runtime thread. Jobs still run one after another.
    let outcome =
        tokio::task::spawn_blocking(move || process_batch(&jobs, &config, &ConsoleReporter)).await;

    match outcome {
        Ok(results) => {
            if json {
                results.iter().for_each(print_json);
            }
            results.iter().all(|result| result.succeeded)
        }
        Err(join_err) => {
            error!(
                "Processing task for {} file(s) failed (panic/cancellation): {}",
                job_count, join_err
            );
            false
        }
    }
}

fn print_json(result: &EncodeResult) {
    match serde_json::to_string(result) {
        Ok(line) => println!("{}", line),
        Err(e) => error!("[Job {}] Failed to serialize result: {}", result.job_id, e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = cli.encode_options();

    let default_filter = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if cli.files.is_empty() {
        println!("Please provide one or more video files.");
        return Ok(());
    }

    let mut config = EncoderConfig::from_env();
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    debug!("Encoder config: {:?}", config);
    debug!("Options: {:?}", options);

    let today = chrono::Local::now().date_naive();
    let jobs = build_jobs(&cli.files, &config.output_dir, today, &options);
    info!("Processing {} file(s)", jobs.len());

    let all_succeeded = tokio::select! {
        ok = jobs_processing_loop(jobs, config, cli.json) => ok,
        _ = signal::ctrl_c() => {
            info!("CTRL-C received, stopping.");
            false
        }
    };

    if !all_succeeded {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ambiguous-world").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = parse(&["clip.mp4"]).encode_options();
        assert_eq!(options.ambiguity, Ambiguity::Level(AmbiguityLevel::Mid));
        assert!(options.muffled_audio);
        assert!(!options.mute_audio);
        assert!(!options.verbose);
    }

    #[test]
    fn test_dev_preset_is_custom_and_verbose() {
        let options = parse(&["--dev-preset", "Blurry", "--ambiguity", "high", "clip.mp4"])
            .encode_options();
        assert_eq!(options.ambiguity, Ambiguity::Custom("Blurry".to_string()));
        assert!(options.verbose);
    }

    #[test]
    fn test_audio_flags() {
        let options = parse(&["--no-muffle", "--mute-audio", "-a", "extreme", "clip.mp4"])
            .encode_options();
        assert!(!options.muffled_audio);
        assert!(options.mute_audio);
        assert_eq!(options.ambiguity, Ambiguity::Level(AmbiguityLevel::Extreme));
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!(Cli::try_parse_from(["ambiguous-world", "--ambiguity", "ultra", "clip.mp4"]).is_err());
    }
}
