use crate::preset::AmbiguityLevel;

/// How the user picked the ambiguity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ambiguity {
    Level(AmbiguityLevel),
    /// Free text typed in developer mode; resolved without validation.
    Custom(String),
}

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub mute_audio: bool,
    /// Narrow the audio band to the preset's low-pass cutoff.
    pub muffled_audio: bool,
    pub ambiguity: Ambiguity,
    pub verbose: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            mute_audio: false,
            muffled_audio: true,
            ambiguity: Ambiguity::Level(AmbiguityLevel::Mid),
            verbose: false,
        }
    }
}
