//! Raw keypoint detections and the keypoint frame stream.
//!
//! Frames are exchanged as JSONL, one frame per line. An optional header
//! line starts with `# ` and carries stream metadata; any other line
//! starting with `#` is a comment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::point::Point3D;

/// Joint name -> raw detection for a single frame.
pub type KeypointMap = BTreeMap<String, RawKeypoint>;

/// One joint detection as produced by the upstream pose detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawKeypoint {
    /// Joint name from the detector's vocabulary (e.g. "left_elbow").
    pub name: String,

    /// Horizontal position in pixels.
    pub x: f64,

    /// Vertical position in pixels.
    pub y: f64,

    /// Relative depth, scaled like `x`.
    #[serde(default)]
    pub z: f64,

    /// Detector confidence in [0, 1].
    pub visibility: f64,
}

impl RawKeypoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z,
            visibility,
        }
    }

    pub fn position(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }
}

/// All detections for one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointFrame {
    /// Seconds since the start of the source.
    #[serde(rename = "t")]
    pub timestamp_secs: f64,

    /// Detections for this frame. May be empty when no pose was found.
    #[serde(default)]
    pub keypoints: Vec<RawKeypoint>,
}

impl KeypointFrame {
    pub fn new(timestamp_secs: f64, keypoints: Vec<RawKeypoint>) -> Self {
        Self {
            timestamp_secs,
            keypoints,
        }
    }

    /// Detections keyed by joint name. A repeated name keeps its last entry.
    pub fn keypoint_map(&self) -> KeypointMap {
        self.keypoints
            .iter()
            .map(|kp| (kp.name.clone(), kp.clone()))
            .collect()
    }
}

/// Metadata line at the top of a keypoint stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Source frame rate.
    pub fps: f64,

    /// Source frame size in pixels, if known.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl FrameStreamHeader {
    /// Source frame size, when both dimensions are known.
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}

/// Errors raised while reading a keypoint stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Malformed frame on line {line}: {source}")]
    MalformedFrame {
        /// One-based line number in the stream.
        line: usize,
        source: serde_json::Error,
    },
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<KeypointFrame>, StreamError> {
    jsonl
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, payload)| {
            serde_json::from_str(payload)
                .map_err(|source| StreamError::MalformedFrame { line, source })
        })
        .collect()
}

/// Extract the stream header from the first `# {...}` line, if any.
pub fn parse_header(jsonl: &str) -> Option<FrameStreamHeader> {
    let first = jsonl.lines().map(str::trim).find(|line| !line.is_empty())?;
    let payload = first.strip_prefix('#')?.trim();
    serde_json::from_str(payload).ok()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[KeypointFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
