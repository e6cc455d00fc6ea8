//! ffprobe output parsing.
//!
//! The probe capability returns machine-parsable JSON describing every stream
//! in the container; only the first stream's dimensions matter here.

use serde::Deserialize;

use crate::engine::MediaError;

/// Width and height of the first video stream of a staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamGeometry {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProbeStream {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Parse ffprobe's `-print_format json -show_streams` output.
///
/// Zero streams is a terminal `NoStreamsFound`; a first stream without
/// positive dimensions (e.g. an audio-only container) is a probe failure,
/// never a default geometry.
pub(crate) fn parse_stream_geometry(output: &[u8]) -> Result<StreamGeometry, MediaError> {
    let parsed: ProbeOutput = serde_json::from_slice(output)
        .map_err(|e| MediaError::ProbeFailed(format!("could not parse probe output: {}", e)))?;

    let stream = parsed.streams.first().ok_or(MediaError::NoStreamsFound)?;

    if stream.width == 0 || stream.height == 0 {
        return Err(MediaError::ProbeFailed(
            "first stream has no dimensions".to_string(),
        ));
    }

    Ok(StreamGeometry {
        width: stream.width,
        height: stream.height,
    })
}
