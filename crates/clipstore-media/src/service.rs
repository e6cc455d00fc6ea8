//! External tool adapters for probe and fast-start remux.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::{Builder, TempPath};
use tokio::process::Command;

use crate::engine::{MediaError, VideoEngine};
use crate::probe::{parse_stream_geometry, StreamGeometry};

/// ffprobe/ffmpeg-backed implementation of [`VideoEngine`].
///
/// Both tools are invoked out of process with the file path as input; their
/// stderr is captured for logging but never surfaced to clients.
pub struct FfmpegService {
    ffprobe_path: String,
    ffmpeg_path: String,
    scratch_dir: PathBuf,
}

impl FfmpegService {
    pub fn new(ffprobe_path: String, ffmpeg_path: String, scratch_dir: PathBuf) -> Self {
        Self {
            ffprobe_path,
            ffmpeg_path,
            scratch_dir,
        }
    }
}

#[async_trait]
impl VideoEngine for FfmpegService {
    async fn probe(&self, path: &Path) -> Result<StreamGeometry, MediaError> {
        tracing::debug!(path = %path.display(), "Probing video streams");

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| MediaError::ProbeFailed(format!("failed to spawn ffprobe: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                status = %output.status,
                stderr = %stderr,
                "ffprobe exited with an error"
            );
            return Err(MediaError::ProbeFailed(format!(
                "ffprobe exited with {}",
                output.status
            )));
        }

        parse_stream_geometry(&output.stdout)
    }

    async fn remux_faststart(&self, input: &Path) -> Result<TempPath, MediaError> {
        let output_path = Builder::new()
            .prefix("clipstore-faststart-")
            .suffix(".mp4")
            .tempfile_in(&self.scratch_dir)?
            .into_temp_path();

        tracing::debug!(
            input = %input.display(),
            output = %output_path.display(),
            "Remuxing for fast start"
        );

        // Stream copy only: container reflow, identical media payload.
        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4", "-y"])
            .arg(output_path.as_os_str())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| MediaError::RemuxFailed(format!("failed to spawn ffmpeg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                status = %output.status,
                stderr = %stderr,
                "ffmpeg exited with an error"
            );
            // output_path still drops here, removing any partial file.
            return Err(MediaError::RemuxFailed(format!(
                "ffmpeg exited with {}",
                output.status
            )));
        }

        Ok(output_path)
    }
}
