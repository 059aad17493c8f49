// Compiles a preset plus options into the ffmpeg argument list. Nothing here runs a process.
use std::ffi::OsString;
use std::path::Path;

use crate::filters::{
    AudioFilter, FilterChain, VideoFilter, BLUR_ALL_PLANES, BLUR_SIGMA, BLUR_STEPS,
    FIXED_CONTRAST, OUTPUT_FPS,
};
use crate::options::EncodeOptions;
use crate::preset::AmbiguityPreset;

pub const VIDEO_CODEC: &str = "libx264";
pub const AUDIO_CODEC: &str = "aac";
pub const AUDIO_BITRATE: &str = "256k";

const FULL_RANGE_HIGHPASS_HZ: u32 = 20;
const FULL_RANGE_LOWPASS_HZ: u32 = 18000;
const MUFFLED_HIGHPASS_HZ: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationShape {
    /// Video only, `-an`.
    Silent,
    ClassicWithAudio,
    StandardWithAudio,
}

/// Which encoder parameter carries the preset's `{unit}k` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoRateMode {
    /// `-b:v {unit}k`
    Absolute(u32),
    /// `-crf {unit}k`. The `k` suffix is passed through as-is.
    QualityFactor(u32),
}

impl VideoRateMode {
    pub fn flag(self) -> &'static str {
        match self {
            VideoRateMode::Absolute(_) => "-b:v",
            VideoRateMode::QualityFactor(_) => "-crf",
        }
    }

    pub fn value(self) -> String {
        match self {
            VideoRateMode::Absolute(unit) | VideoRateMode::QualityFactor(unit) => {
                format!("{}k", unit)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPipeline {
    pub shape: InvocationShape,
    pub rate: VideoRateMode,
    pub video_filters: FilterChain<VideoFilter>,
    /// `None` when the audio stream is dropped.
    pub audio_filters: Option<FilterChain<AudioFilter>>,
}

pub fn video_filter_chain(preset: &AmbiguityPreset) -> FilterChain<VideoFilter> {
    let chain = FilterChain::new()
        .then(VideoFilter::Fps(OUTPUT_FPS))
        .then(VideoFilter::EvenDimensions);
    if preset.is_classic() {
        return chain;
    }
    chain
        .then(VideoFilter::Eq {
            brightness: preset.brightness,
            saturation: preset.saturation,
            contrast: FIXED_CONTRAST,
        })
        .then(VideoFilter::GaussianBlur {
            sigma: BLUR_SIGMA,
            steps: BLUR_STEPS,
            planes: BLUR_ALL_PLANES,
        })
}

pub fn audio_filter_chain(preset: &AmbiguityPreset, muffled: bool) -> FilterChain<AudioFilter> {
    let (low, high) = if muffled {
        (MUFFLED_HIGHPASS_HZ, preset.audio_lowpass_hz)
    } else {
        (FULL_RANGE_HIGHPASS_HZ, FULL_RANGE_LOWPASS_HZ)
    };
    FilterChain::new()
        .then(AudioFilter::Highpass(low))
        .then(AudioFilter::Lowpass(high))
}

pub fn compile_pipeline(preset: &AmbiguityPreset, options: &EncodeOptions) -> CompiledPipeline {
    let video_filters = video_filter_chain(preset);

    if options.mute_audio {
        return CompiledPipeline {
            shape: InvocationShape::Silent,
            rate: VideoRateMode::Absolute(preset.bitrate_unit),
            video_filters,
            audio_filters: None,
        };
    }

    let (shape, rate) = if preset.is_classic() {
        (
            InvocationShape::ClassicWithAudio,
            VideoRateMode::Absolute(preset.bitrate_unit),
        )
    } else {
        (
            InvocationShape::StandardWithAudio,
            VideoRateMode::QualityFactor(preset.bitrate_unit),
        )
    };

    CompiledPipeline {
        shape,
        rate,
        video_filters,
        audio_filters: Some(audio_filter_chain(preset, options.muffled_audio)),
    }
}

impl CompiledPipeline {
    /// Arguments for the encoder, excluding the program itself.
    ///
    /// Bitrates come first, then the remaining options in name order, the
    /// output path, and the overwrite flag last.
    pub fn command_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-i".into(), input.into()];

        if let VideoRateMode::Absolute(_) = self.rate {
            args.push(self.rate.flag().into());
            args.push(self.rate.value().into());
        }

        match &self.audio_filters {
            Some(audio_filters) => {
                args.push("-b:a".into());
                args.push(AUDIO_BITRATE.into());
                args.push("-acodec".into());
                args.push(AUDIO_CODEC.into());
                args.push("-af".into());
                args.push(audio_filters.to_string().into());
            }
            None => args.push("-an".into()),
        }

        if let VideoRateMode::QualityFactor(_) = self.rate {
            args.push(self.rate.flag().into());
            args.push(self.rate.value().into());
        }

        args.push("-vcodec".into());
        args.push(VIDEO_CODEC.into());
        args.push("-vf".into());
        args.push(self.video_filters.to_string().into());
        args.push(output.into());
        args.push("-y".into());
        args
    }
}
