use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Audio output format for speech synthesis.
///
/// Defined in core because it's selected through configuration; the speech
/// crate maps it onto the provider's own format type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Mp3,
    OggVorbis,
    Pcm,
}

impl AudioFormat {
    /// File extension for audio written in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::OggVorbis => "ogg",
            AudioFormat::Pcm => "pcm",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "ogg" | "ogg_vorbis" => Ok(AudioFormat::OggVorbis),
            "pcm" => Ok(AudioFormat::Pcm),
            _ => Err(anyhow::anyhow!("Unsupported audio format: {}", s)),
        }
    }
}

impl Display for AudioFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AudioFormat::Mp3 => write!(f, "mp3"),
            AudioFormat::OggVorbis => write!(f, "ogg_vorbis"),
            AudioFormat::Pcm => write!(f, "pcm"),
        }
    }
}
