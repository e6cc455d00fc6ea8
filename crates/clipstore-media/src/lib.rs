//! Clipstore media pipeline leaves
//!
//! The pieces of the ingestion pipeline that touch local files and external
//! tools: staged temporary files, the ffprobe adapter, the orientation
//! classifier, and the ffmpeg fast-start remux adapter. The HTTP layer drives
//! them through the [`VideoEngine`] capability trait so tests can substitute
//! doubles with the same contract.

pub mod engine;
pub mod orientation;
pub mod probe;
pub mod service;
pub mod staging;

pub use engine::{MediaError, VideoEngine};
pub use orientation::Orientation;
pub use probe::StreamGeometry;
pub use service::FfmpegService;
pub use staging::StagedFile;
