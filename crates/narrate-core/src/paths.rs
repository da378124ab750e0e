//! Key and working-directory path composition.
//!
//! Remote object keys are '/'-joined relative paths built with [`join_key`];
//! local job artifacts live in fixed subdirectories of a working directory
//! described by [`JobLayout`]. Both are pure: nothing here touches the
//! filesystem or the network.

use std::path::PathBuf;

const DOWNLOADS_DIR: &str = "downloads";
const AUDIO_DIR: &str = "audio";
const ARCHIVES_DIR: &str = "archives";

/// Join storage key segments with '/'.
///
/// Empty segments are dropped and surrounding slashes are normalized, so the
/// result never has doubled, leading, or trailing separators. Joining is
/// associative: `join_key(&[join_key(&[a, b]).as_str(), c])` equals
/// `join_key(&[a, b, c])`.
pub fn join_key(segments: &[&str]) -> String {
    segments
        .iter()
        .flat_map(|segment| segment.split('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Fixed layout of local artifacts for narration jobs.
///
/// Downloaded text goes under `downloads/`, synthesized audio under `audio/`,
/// and finished archives under `archives/`, all relative to one working
/// directory. Names are derived from the input, never from timestamps, so
/// re-running a job overwrites its previous artifacts in place.
#[derive(Debug, Clone)]
pub struct JobLayout {
    root: PathBuf,
}

impl JobLayout {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        JobLayout {
            root: work_dir.into(),
        }
    }

    /// Local destination for a downloaded text object.
    ///
    /// `file_name` is joined verbatim, so callers must pass a plain file
    /// name with no separators.
    pub fn text_path(&self, file_name: &str) -> PathBuf {
        self.root.join(DOWNLOADS_DIR).join(file_name)
    }

    /// Local destination for synthesized audio.
    pub fn audio_path(&self, stem: &str, extension: &str) -> PathBuf {
        self.root
            .join(AUDIO_DIR)
            .join(format!("{}.{}", stem, extension))
    }

    /// Local destination for the finished ZIP archive.
    pub fn archive_path(&self, stem: &str) -> PathBuf {
        self.root
            .join(ARCHIVES_DIR)
            .join(format!("{}.zip", stem))
    }
}
