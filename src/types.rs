//! Core data types shared across the capture pipeline
//!
//! Frames are immutable raster snapshots pulled from the frame source;
//! every per-tick value (frame, face region, quality score) is created and
//! discarded within a single scheduler tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monotonic high-resolution timestamp in milliseconds.
///
/// Used only for interval arithmetic, never wall-clock semantics.
pub type TimestampMs = f64;

/// Immutable raster snapshot of the video feed.
///
/// Pixel data is tightly packed RGB24, row-major. Frames are read-only once
/// constructed; loops take ownership of the frame they pulled and drop it at
/// the end of their tick.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Monotonic sequence number assigned by the frame source.
    pub sequence: u64,
    /// Monotonic capture timestamp in milliseconds.
    pub timestamp_ms: TimestampMs,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            sequence: 0,
            timestamp_ms: 0.0,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: TimestampMs) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Luminance of the pixel at (x, y) using Rec. 601 weights.
    ///
    /// Out-of-bounds coordinates return 0.0 so callers stay total.
    #[inline]
    pub fn luma(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        let idx = ((y as usize * self.width as usize) + x as usize) * 3;
        match self.data.get(idx..idx + 3) {
            Some(px) => 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32,
            None => 0.0,
        }
    }
}

/// Primary face region reported by the detector for one detection tick.
///
/// Never retained across ticks; there is no tracking or interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Detection confidence in [0, 1].
    pub confidence: f32,
}

impl FaceRegion {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Quality assessment for a single frame, produced fresh each detection tick.
///
/// A sharpness of 0.0 is a valid "no signal" value; the analyzer guarantees
/// the score is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Laplacian-variance style sharpness estimate, >= 0.
    pub sharpness: f64,
    /// Whether the frame's reference points fall inside the target region.
    pub framing_ok: bool,
}

impl QualityScore {
    /// Neutral score used when no frame is available.
    pub fn zero() -> Self {
        Self {
            sharpness: 0.0,
            framing_ok: false,
        }
    }
}

/// Terminal artifact of the pipeline: the frame selected at the moment the
/// gate reached its accept decision, immutable once produced.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub frame: Frame,
    pub face: FaceRegion,
    pub quality: QualityScore,
    /// Monotonic pipeline time of the accepting detection tick.
    pub timestamp_ms: TimestampMs,
    /// Wall-clock time of capture, for downstream metadata only.
    pub captured_at: DateTime<Utc>,
}
