//! Face detector boundary
//!
//! The detection model itself lives outside this crate. The pipeline calls
//! it as a black box, at most once per detection tick, and treats any
//! failure as a bad sample rather than a fault.

use crate::config::DetectorConfig;
use crate::errors::PipelineError;
use crate::types::{FaceRegion, Frame};

/// Pluggable face detection backend.
///
/// Returns the primary detected face, or `None` when no face clears
/// `config.score_threshold`. Implementations must never be invoked faster
/// than the detection loop's throttle interval; the scheduler enforces this.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        config: &DetectorConfig,
    ) -> Result<Option<FaceRegion>, PipelineError>;
}
