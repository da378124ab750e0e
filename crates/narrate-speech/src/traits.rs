//! Speech synthesis abstraction trait
//!
//! This module defines the Synthesizer trait that speech providers implement,
//! plus the input validation shared by all of them.

use async_trait::async_trait;
use narrate_core::AudioFormat;
use serde::Serialize;
use thiserror::Error;

/// Maximum accepted input length in characters.
///
/// Amazon Polly rejects plain-text synthesis requests above this size. The
/// check runs before the request is sent so oversized input fails with a
/// typed error instead of a provider rejection, and is never silently
/// truncated.
pub const MAX_TEXT_CHARS: usize = 3000;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Input text is empty")]
    EmptyText,

    #[error("Input text is {length} characters; the service accepts at most {limit}")]
    TextTooLong { length: usize, limit: usize },

    #[error("Speech service error: {0}")]
    Service(String),
}

/// Result type for speech operations
pub type SpeechResult<T> = Result<T, SpeechError>;

/// How a piece of text should be rendered: which voice, which engine, and
/// what audio container to produce. Voice and engine are passed through to
/// the provider as-is; the provider rejects names it does not know.
#[derive(Debug, Clone)]
pub struct VoiceSpec {
    pub voice: String,
    pub engine: String,
    pub format: AudioFormat,
}

/// One voice offered by the speech service.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub language_code: String,
    pub language_name: String,
    pub gender: String,
    pub engines: Vec<String>,
}

/// Speech synthesis abstraction trait
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Render `text` as audio in the requested voice and format, returning
    /// the full encoded audio.
    async fn synthesize(&self, text: &str, spec: &VoiceSpec) -> SpeechResult<Vec<u8>>;

    /// List voices offered by the service, optionally filtered by engine
    /// and language code.
    async fn voices(
        &self,
        engine: Option<&str>,
        language: Option<&str>,
    ) -> SpeechResult<Vec<VoiceInfo>>;
}

/// Validate synthesis input before it reaches the provider.
pub fn validate_text(text: &str) -> SpeechResult<()> {
    if text.trim().is_empty() {
        return Err(SpeechError::EmptyText);
    }

    let length = text.chars().count();
    if length > MAX_TEXT_CHARS {
        return Err(SpeechError::TextTooLong {
            length,
            limit: MAX_TEXT_CHARS,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_accepts_normal_input() {
        assert!(validate_text("Hello there.").is_ok());
        assert!(validate_text(&"a".repeat(MAX_TEXT_CHARS)).is_ok());
    }

    #[test]
    fn test_validate_text_rejects_empty_input() {
        assert!(matches!(validate_text(""), Err(SpeechError::EmptyText)));
        assert!(matches!(validate_text("   \n\t"), Err(SpeechError::EmptyText)));
    }

    #[test]
    fn test_validate_text_rejects_oversized_input() {
        let result = validate_text(&"a".repeat(MAX_TEXT_CHARS + 1));
        match result {
            Err(SpeechError::TextTooLong { length, limit }) => {
                assert_eq!(length, MAX_TEXT_CHARS + 1);
                assert_eq!(limit, MAX_TEXT_CHARS);
            }
            other => panic!("expected TextTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_text_counts_characters_not_bytes() {
        // Multi-byte characters count once each.
        let text = "न".repeat(MAX_TEXT_CHARS);
        assert!(text.len() > MAX_TEXT_CHARS);
        assert!(validate_text(&text).is_ok());
    }
}
