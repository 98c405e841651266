//! FrameGate: real-time video frame quality gating for identity capture
//!
//! This crate coordinates the hard part of a selfie/liveness capture step:
//! two throttled periodic loops (render ~30 fps, detection 10 fps) over one
//! shared frame source, fused into a deterministic accept decision.
//!
//! # Features
//! - Throttled cooperative scheduler with guaranteed, idempotent cancellation
//! - Stride-sampled sharpness and framing analysis (pure, total, no panics)
//! - Streak-based capture gate with explicit terminal states
//! - Single-submission guidance overlay rendering
//! - Process-wide session teardown and tab-visibility hooks
//!
//! # Usage
//! ```rust,ignore
//! use framegate::{CapturePipeline, FrameGateConfig};
//! use std::time::Duration;
//!
//! let config = FrameGateConfig::load_or_default();
//! let mut pipeline = CapturePipeline::new(config, frame_source, face_detector)?
//!     .with_surface(overlay_surface);
//! pipeline.start()?;
//! pipeline.run(Duration::from_millis(8));
//! if let Some(result) = pipeline.take_capture_result() {
//!     // hand the accepted frame to the submission flow
//! }
//! ```
pub mod config;
pub mod detector;
pub mod errors;
pub mod gate;
pub mod lifecycle;
pub mod overlay;
pub mod pipeline;
pub mod quality;
pub mod scheduler;
pub mod source;
pub mod types;

// Testing utilities - synthetic data and fakes for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::FrameGateConfig;
pub use detector::FaceDetector;
pub use errors::PipelineError;
pub use gate::{CaptureGate, GateSample, GateState};
pub use overlay::{DrawSurface, OverlayRenderer};
pub use pipeline::CapturePipeline;
pub use quality::QualityAnalyzer;
pub use scheduler::{Clock, LoopCommand, MonotonicClock, Scheduler, SchedulerDriver};
pub use source::FrameSource;
pub use types::{CaptureResult, FaceRegion, Frame, QualityScore, TimestampMs};

/// Initialize logging for the pipeline
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "framegate=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
