//! Staged temporary files for in-flight uploads.
//!
//! A [`StagedFile`] is the scoped-acquisition handle for an upload's raw
//! bytes: created empty, written once by a streaming copy, read by the probe
//! and remux steps, and deleted when the handle drops, on every exit path.

use std::io;
use std::path::Path;

use tempfile::{Builder, TempPath};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// An exclusively owned temporary file holding raw uploaded bytes.
///
/// Deletion is tied to drop, so early returns and failures in any later
/// pipeline step release the file without step-specific cleanup.
pub struct StagedFile {
    file: File,
    path: TempPath,
    bytes_written: u64,
}

impl StagedFile {
    /// Create an empty, uniquely named staging file in `dir`.
    pub async fn create_in(dir: &Path) -> io::Result<StagedFile> {
        let named = Builder::new()
            .prefix("clipstore-upload-")
            .suffix(".mp4")
            .tempfile_in(dir)?;
        let (std_file, path) = named.into_parts();

        Ok(StagedFile {
            file: File::from_std(std_file),
            path,
            bytes_written: 0,
        })
    }

    /// Append a chunk of the upload body.
    pub async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    /// Flush buffered bytes so downstream readers observe the full file.
    pub async fn finish(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}
