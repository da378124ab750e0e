//! Configuration module
//!
//! All settings come from `NARRATE_*` environment variables, with standard
//! AWS fallbacks (`S3_BUCKET`, `AWS_REGION`) where deployments already define
//! them. Configuration is validated eagerly: `from_env` fails on the first
//! missing or malformed setting, before any storage or speech call is made.

use std::env;

use crate::audio::AudioFormat;
use crate::storage_types::StorageBackend;

const DEFAULT_WORK_DIR: &str = ".";
const DEFAULT_INPUT_NAME: &str = "input.txt";
const DEFAULT_VOICE: &str = "Aditi";
const DEFAULT_ENGINE: &str = "standard";
const DEFAULT_FORMAT: &str = "mp3";
const DEFAULT_LANGUAGE: &str = "en-IN";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bucket holding text inputs (and uploaded archives). S3 backend only.
    pub bucket: String,
    /// AWS region used for both storage and speech synthesis.
    pub region: String,
    /// Key namespace jobs read from and write to, e.g. "audiobooks".
    pub base_path: String,
    /// Optional key segment appended under `base_path`. May be empty.
    pub prefix: String,
    pub storage_backend: StorageBackend,
    /// Root directory of the local storage backend (local backend only).
    pub local_store: Option<String>,
    /// Local working directory for downloaded text, audio, and archives.
    pub work_dir: String,
    /// Default object file name narrated by `run`.
    pub input_name: String,
    pub voice: String,
    pub engine: String,
    pub format: AudioFormat,
    /// Language code used when listing voices.
    pub language: String,
    /// Upload finished archives back to storage after a successful run.
    pub upload_results: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = match env::var("NARRATE_STORAGE_BACKEND") {
            Ok(raw) => raw.parse::<StorageBackend>()?,
            Err(_) => StorageBackend::S3,
        };

        let format = env::var("NARRATE_FORMAT")
            .unwrap_or_else(|_| DEFAULT_FORMAT.to_string())
            .parse::<AudioFormat>()?;

        let config = Config {
            bucket: env::var("NARRATE_BUCKET")
                .or_else(|_| env::var("S3_BUCKET"))
                .unwrap_or_default(),
            region: env::var("NARRATE_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_default(),
            base_path: env::var("NARRATE_BASE_PATH").unwrap_or_default(),
            prefix: env::var("NARRATE_PREFIX").unwrap_or_default(),
            storage_backend,
            local_store: env::var("NARRATE_LOCAL_STORE").ok(),
            work_dir: env::var("NARRATE_WORK_DIR")
                .unwrap_or_else(|_| DEFAULT_WORK_DIR.to_string()),
            input_name: env::var("NARRATE_INPUT")
                .unwrap_or_else(|_| DEFAULT_INPUT_NAME.to_string()),
            voice: env::var("NARRATE_VOICE").unwrap_or_else(|_| DEFAULT_VOICE.to_string()),
            engine: env::var("NARRATE_ENGINE").unwrap_or_else(|_| DEFAULT_ENGINE.to_string()),
            format,
            language: env::var("NARRATE_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            upload_results: env::var("NARRATE_UPLOAD_RESULTS")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.region.trim().is_empty() {
            return Err(anyhow::anyhow!("NARRATE_REGION or AWS_REGION must be set"));
        }

        if self.base_path.trim().is_empty() {
            return Err(anyhow::anyhow!("NARRATE_BASE_PATH must be set"));
        }

        for (name, value) in [
            ("NARRATE_BASE_PATH", self.base_path.as_str()),
            ("NARRATE_PREFIX", self.prefix.as_str()),
        ] {
            if value.starts_with('/') || value.contains("..") {
                return Err(anyhow::anyhow!(
                    "{} must be a relative key without '..' segments",
                    name
                ));
            }
        }

        if self.input_name.trim().is_empty()
            || self.input_name.contains('/')
            || self.input_name.contains("..")
        {
            return Err(anyhow::anyhow!(
                "NARRATE_INPUT must be a plain file name without path separators"
            ));
        }

        if self.voice.trim().is_empty() {
            return Err(anyhow::anyhow!("NARRATE_VOICE must not be empty"));
        }

        if self.engine.trim().is_empty() {
            return Err(anyhow::anyhow!("NARRATE_ENGINE must not be empty"));
        }

        if self.work_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("NARRATE_WORK_DIR must not be empty"));
        }

        // Validate storage backend configuration
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.bucket.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "NARRATE_BUCKET or S3_BUCKET must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                let store = self.local_store.as_deref().map(str::trim).unwrap_or("");
                if store.is_empty() {
                    return Err(anyhow::anyhow!(
                        "NARRATE_LOCAL_STORE must be set when using the local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
