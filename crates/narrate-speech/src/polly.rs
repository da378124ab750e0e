//! Amazon Polly speech synthesis provider

use crate::traits::{
    validate_text, SpeechError, SpeechResult, Synthesizer, VoiceInfo, VoiceSpec,
};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_polly::types::{Engine, LanguageCode, OutputFormat, VoiceId};
use aws_sdk_polly::Client as PollyClient;
use narrate_core::AudioFormat;

/// Speech synthesis backed by Amazon Polly.
pub struct PollySynthesizer {
    client: PollyClient,
}

impl PollySynthesizer {
    /// Create a Polly client for the given region.
    ///
    /// Credentials come from the SDK's default provider chain (environment,
    /// shared profile, instance metadata).
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        PollySynthesizer {
            client: PollyClient::new(&config),
        }
    }
}

fn output_format(format: AudioFormat) -> OutputFormat {
    match format {
        AudioFormat::Mp3 => OutputFormat::Mp3,
        AudioFormat::OggVorbis => OutputFormat::OggVorbis,
        AudioFormat::Pcm => OutputFormat::Pcm,
    }
}

#[async_trait]
impl Synthesizer for PollySynthesizer {
    async fn synthesize(&self, text: &str, spec: &VoiceSpec) -> SpeechResult<Vec<u8>> {
        validate_text(text)?;
        let start = std::time::Instant::now();

        let response = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(spec.voice.as_str()))
            .engine(Engine::from(spec.engine.as_str()))
            .output_format(output_format(spec.format))
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                tracing::error!(
                    error = %err,
                    voice = %spec.voice,
                    engine = %spec.engine,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Speech synthesis failed"
                );
                SpeechError::Service(err.to_string())
            })?;

        let audio = response
            .audio_stream
            .collect()
            .await
            .map_err(|e| SpeechError::Service(format!("Failed to read audio stream: {}", e)))?
            .into_bytes()
            .to_vec();

        tracing::info!(
            voice = %spec.voice,
            engine = %spec.engine,
            format = %spec.format,
            text_chars = text.chars().count(),
            size_bytes = audio.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Speech synthesis successful"
        );

        Ok(audio)
    }

    async fn voices(
        &self,
        engine: Option<&str>,
        language: Option<&str>,
    ) -> SpeechResult<Vec<VoiceInfo>> {
        let mut request = self.client.describe_voices();
        if let Some(engine) = engine {
            request = request.engine(Engine::from(engine));
        }
        if let Some(language) = language {
            request = request.language_code(LanguageCode::from(language));
        }

        let response = request.send().await.map_err(|e| {
            let err = e.into_service_error();
            tracing::error!(error = %err, "Listing voices failed");
            SpeechError::Service(err.to_string())
        })?;

        let voices = response
            .voices()
            .iter()
            .map(|voice| VoiceInfo {
                id: voice
                    .id()
                    .map(|id| id.as_str().to_string())
                    .unwrap_or_default(),
                name: voice.name().unwrap_or_default().to_string(),
                language_code: voice
                    .language_code()
                    .map(|code| code.as_str().to_string())
                    .unwrap_or_default(),
                language_name: voice.language_name().unwrap_or_default().to_string(),
                gender: voice
                    .gender()
                    .map(|gender| gender.as_str().to_string())
                    .unwrap_or_default(),
                engines: voice
                    .supported_engines()
                    .iter()
                    .map(|engine| engine.as_str().to_string())
                    .collect(),
            })
            .collect();

        Ok(voices)
    }
}
