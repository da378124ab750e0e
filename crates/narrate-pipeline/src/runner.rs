//! Narration job orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use narrate_core::{join_key, JobLayout};
use narrate_speech::{SpeechError, Synthesizer, VoiceSpec};
use narrate_storage::{Storage, StorageError};

use crate::archive::{self, ArchiveError};
use crate::fsutil;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DownloadText,
    ReadText,
    Synthesize,
    WriteAudio,
    Archive,
    UploadArchive,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::DownloadText => "download_text",
            Stage::ReadText => "read_text",
            Stage::Synthesize => "synthesize",
            Stage::WriteAudio => "write_audio",
            Stage::Archive => "archive",
            Stage::UploadArchive => "upload_archive",
        };
        write!(f, "{}", name)
    }
}

/// Error produced by a single pipeline stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Invalid input name: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StageError {
    /// Whether the failure is environmental rather than job-specific.
    ///
    /// Credential refusals and broken configuration fail every job until an
    /// operator steps in. Missing objects, rejected input, and transient
    /// service failures only concern the current job.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StageError::Storage(StorageError::AccessDenied(_))
                | StageError::Storage(StorageError::ConfigError(_))
        )
    }
}

/// A pipeline failure, tagged with the stage that produced it.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub source: StageError,
}

impl PipelineError {
    fn at(stage: Stage, source: impl Into<StageError>) -> Self {
        PipelineError {
            stage,
            source: source.into(),
        }
    }

    /// Whether the failure is environmental; see [`StageError::is_fatal`].
    pub fn is_fatal(&self) -> bool {
        self.source.is_fatal()
    }
}

/// One narration job: which object to narrate and how.
#[derive(Debug, Clone)]
pub struct Job {
    /// Object file name under `remote_dir`, e.g. "chapter-01.txt". Must be
    /// a plain file name; names with separators or `..` fail the job.
    pub input_name: String,
    /// Key namespace the input is read from (and the archive uploaded to).
    pub remote_dir: String,
    pub voice: VoiceSpec,
    /// Upload the finished archive back to storage.
    pub upload_results: bool,
}

/// Artifacts produced by a completed narration job.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub text_path: PathBuf,
    pub audio_path: PathBuf,
    pub archive_path: PathBuf,
    pub text_chars: usize,
    pub audio_bytes: u64,
    pub archive_bytes: u64,
    pub uploaded_key: Option<String>,
}

/// Executes narration jobs against injected storage and speech gateways.
pub struct Pipeline {
    storage: Arc<dyn Storage>,
    synthesizer: Arc<dyn Synthesizer>,
    layout: JobLayout,
}

impl Pipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        synthesizer: Arc<dyn Synthesizer>,
        layout: JobLayout,
    ) -> Self {
        Pipeline {
            storage,
            synthesizer,
            layout,
        }
    }

    /// Run every stage of `job` in order, stopping at the first failure.
    ///
    /// Artifact names derive from the input name alone, so re-running the
    /// same job overwrites its previous outputs instead of accumulating.
    pub async fn run(&self, job: &Job) -> Result<JobOutcome, PipelineError> {
        // The input name doubles as a storage key segment and a file name
        // under the working directory; `PathBuf::join` replaces the base
        // when handed an absolute path, so path-shaped names are rejected
        // before any stage runs.
        if job.input_name.trim().is_empty()
            || job.input_name.contains('/')
            || job.input_name.contains("..")
        {
            return Err(PipelineError::at(
                Stage::DownloadText,
                StageError::InvalidInput(job.input_name.clone()),
            ));
        }

        let stem = std::path::Path::new(&job.input_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(job.input_name.as_str())
            .to_string();

        info!(
            input = %job.input_name,
            voice = %job.voice.voice,
            engine = %job.voice.engine,
            "Starting narration job"
        );

        let text_key = join_key(&[&job.remote_dir, &job.input_name]);
        let text_path = self.layout.text_path(&job.input_name);
        self.storage
            .download(&text_key, &text_path)
            .await
            .map_err(|e| PipelineError::at(Stage::DownloadText, e))?;

        let text = fsutil::read_text(&text_path)
            .await
            .map_err(|e| PipelineError::at(Stage::ReadText, e))?;
        let text_chars = text.chars().count();
        info!(text_chars, path = %text_path.display(), "Loaded narration text");

        let audio = self
            .synthesizer
            .synthesize(&text, &job.voice)
            .await
            .map_err(|e| PipelineError::at(Stage::Synthesize, e))?;

        let audio_path = self.layout.audio_path(&stem, job.voice.format.extension());
        fsutil::write_bytes(&audio_path, &audio)
            .await
            .map_err(|e| PipelineError::at(Stage::WriteAudio, e))?;
        let audio_bytes = audio.len() as u64;
        info!(size_bytes = audio_bytes, path = %audio_path.display(), "Wrote narration audio");

        let archive_path = self.layout.archive_path(&stem);
        let archive_bytes = archive::archive_file(&audio_path, &archive_path)
            .await
            .map_err(|e| PipelineError::at(Stage::Archive, e))?;
        info!(size_bytes = archive_bytes, path = %archive_path.display(), "Wrote narration archive");

        let uploaded_key = if job.upload_results {
            let key = join_key(&[&job.remote_dir, &format!("{}.zip", stem)]);
            self.storage
                .upload(&archive_path, &key)
                .await
                .map_err(|e| PipelineError::at(Stage::UploadArchive, e))?;
            Some(key)
        } else {
            None
        };

        info!(input = %job.input_name, "Narration job complete");

        Ok(JobOutcome {
            text_path,
            audio_path,
            archive_path,
            text_chars,
            audio_bytes,
            archive_bytes,
            uploaded_key,
        })
    }
}
