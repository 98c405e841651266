//! Testing utilities for FrameGate
//!
//! Provides synthetic frames and deterministic fakes (clock, frame source,
//! detector, surface) for offline testing without camera hardware or a
//! detection model.

pub mod synthetic_data;

pub use synthetic_data::{
    centered_face, checkerboard_frame, flat_frame, gradient_frame, noise_frame, DetectorScript,
    FakeFrameSource, ManualClock, RecordingSurface, ScriptedDetector,
};
