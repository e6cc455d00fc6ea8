//! Capability trait for out-of-process media tooling.
//!
//! Probe and remux are external invocations with a strict contract: path in,
//! structured data or a new file out, non-zero exit is failure. The pipeline
//! only depends on this trait, so the concrete tool can be swapped (or stubbed
//! in tests) without touching orchestration logic.

use std::path::Path;

use async_trait::async_trait;
use tempfile::TempPath;

use crate::probe::StreamGeometry;

/// Errors from the external probe/remux capabilities.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    #[error("No video streams found")]
    NoStreamsFound,

    #[error("Remux failed: {0}")]
    RemuxFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Out-of-process media operations used by the ingestion pipeline.
#[async_trait]
pub trait VideoEngine: Send + Sync {
    /// Inspect the file at `path` and return the first video stream's geometry.
    async fn probe(&self, path: &Path) -> Result<StreamGeometry, MediaError>;

    /// Rewrite the container of `input` so the index precedes the media
    /// payload, without re-encoding. Returns the path of a new temporary
    /// file; the input is left untouched. The returned `TempPath` removes
    /// the file when dropped.
    async fn remux_faststart(&self, input: &Path) -> Result<TempPath, MediaError>;
}
