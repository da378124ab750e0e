//! Narrate Pipeline Library
//!
//! This crate orchestrates a narration job end to end: fetch the text object,
//! synthesize speech through the configured provider, write the audio
//! locally, and wrap it in a ZIP archive. Stages run strictly in order and
//! the first failure aborts the job with the failing stage attached to the
//! error.

pub mod archive;
pub mod fsutil;
pub mod runner;

// Re-export commonly used types
pub use archive::{archive_file, ArchiveError};
pub use runner::{Job, JobOutcome, Pipeline, PipelineError, Stage, StageError};
