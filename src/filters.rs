// Filter stages for the ffmpeg -vf / -af chains.
use std::fmt;

/// Frame rate every output is normalized to.
pub const OUTPUT_FPS: u32 = 30;
pub const FIXED_CONTRAST: f64 = 0.5;
pub const BLUR_SIGMA: u32 = 1;
pub const BLUR_STEPS: u32 = 2;
/// Bitmask selecting all four planes.
pub const BLUR_ALL_PLANES: u32 = 15;

#[derive(Debug, Clone, PartialEq)]
pub enum VideoFilter {
    Fps(u32),
    /// Round width and height down to even values, as libx264 requires.
    EvenDimensions,
    Eq {
        brightness: f64,
        saturation: f64,
        contrast: f64,
    },
    /// Gaussian blur with the vertical sigma left at -1 (same as horizontal).
    GaussianBlur { sigma: u32, steps: u32, planes: u32 },
}

impl fmt::Display for VideoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoFilter::Fps(fps) => write!(f, "fps={}", fps),
            VideoFilter::EvenDimensions => f.write_str("scale=trunc(iw/2)*2:trunc(ih/2)*2"),
            VideoFilter::Eq {
                brightness,
                saturation,
                contrast,
            } => write!(
                f,
                "eq=brightness={}:saturation={}:contrast={}",
                brightness, saturation, contrast
            ),
            VideoFilter::GaussianBlur {
                sigma,
                steps,
                planes,
            } => write!(
                f,
                "gblur=sigma={}:steps={}:planes={}:sigmaV=-1",
                sigma, steps, planes
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFilter {
    Highpass(u32),
    Lowpass(u32),
}

impl fmt::Display for AudioFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioFilter::Highpass(hz) => write!(f, "highpass=f={}", hz),
            AudioFilter::Lowpass(hz) => write!(f, "lowpass=f={}", hz),
        }
    }
}

/// Ordered list of filter stages, serialized comma-separated.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain<F> {
    stages: Vec<F>,
}

impl<F> FilterChain<F> {
    pub fn new() -> Self {
        FilterChain { stages: Vec::new() }
    }

    pub fn then(mut self, stage: F) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[F] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<F> Default for FilterChain<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: fmt::Display> fmt::Display for FilterChain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}
