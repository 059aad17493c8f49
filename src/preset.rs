// Ambiguity presets and their resolution from user input.
use std::fmt;
use std::str::FromStr;

use crate::error::{EncodeError, Result};
use crate::options::Ambiguity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbiguityLevel {
    Classic,
    Low,
    Mid,
    High,
    Extreme,
}

impl AmbiguityLevel {
    /// Order in which the levels are offered to the user.
    pub const ALL: [AmbiguityLevel; 5] = [
        AmbiguityLevel::Classic,
        AmbiguityLevel::Low,
        AmbiguityLevel::Mid,
        AmbiguityLevel::High,
        AmbiguityLevel::Extreme,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AmbiguityLevel::Classic => "Classic",
            AmbiguityLevel::Low => "Low",
            AmbiguityLevel::Mid => "Mid",
            AmbiguityLevel::High => "High",
            AmbiguityLevel::Extreme => "Extreme",
        }
    }

    pub fn preset(self) -> AmbiguityPreset {
        let (bitrate_unit, brightness, saturation, audio_lowpass_hz) = match self {
            AmbiguityLevel::Mid => (16, 0.4, 0.5, 300),
            AmbiguityLevel::Classic => (1, 0.0, 1.0, 5000),
            AmbiguityLevel::Low => (32, 0.3, 0.6, 500),
            AmbiguityLevel::High => (8, 0.45, 0.4, 220),
            AmbiguityLevel::Extreme => (4, 0.5, 0.4, 170),
        };
        AmbiguityPreset {
            level: self,
            bitrate_unit,
            brightness,
            saturation,
            audio_lowpass_hz,
        }
    }
}

impl fmt::Display for AmbiguityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lenient parse used for command-line selection; names match case-insensitively.
impl FromStr for AmbiguityLevel {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        AmbiguityLevel::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EncodeError::UnrecognizedPreset(s.to_string()))
    }
}

/// Encoding parameters bound to one ambiguity level. Never mutated after lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbiguityPreset {
    pub level: AmbiguityLevel,
    /// Used as `{unit}k`, either as a video bitrate or a quality factor.
    pub bitrate_unit: u32,
    pub brightness: f64,
    pub saturation: f64,
    /// Upper band edge of the muffled audio chain.
    pub audio_lowpass_hz: u32,
}

impl AmbiguityPreset {
    pub fn name(&self) -> &'static str {
        self.level.name()
    }

    pub fn is_classic(&self) -> bool {
        self.level == AmbiguityLevel::Classic
    }
}

/// Resolves the user's ambiguity selection to its preset.
///
/// Free text from developer mode only matches the exact built-in names; anything
/// else is reported instead of falling back to a default.
pub fn resolve_preset(ambiguity: &Ambiguity) -> Result<AmbiguityPreset> {
    match ambiguity {
        Ambiguity::Level(level) => Ok(level.preset()),
        Ambiguity::Custom(raw) => AmbiguityLevel::ALL
            .into_iter()
            .find(|level| level.name() == raw)
            .map(AmbiguityLevel::preset)
            .ok_or_else(|| EncodeError::UnrecognizedPreset(raw.clone())),
    }
}
