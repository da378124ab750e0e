//! Narrate Speech Library
//!
//! This crate provides the speech synthesis abstraction and the Amazon Polly
//! implementation. The pipeline depends only on the [`Synthesizer`] trait.

pub mod polly;
pub mod traits;

// Re-export commonly used types
pub use narrate_core::AudioFormat;
pub use polly::PollySynthesizer;
pub use traits::{
    validate_text, SpeechError, SpeechResult, Synthesizer, VoiceInfo, VoiceSpec, MAX_TEXT_CHARS,
};
