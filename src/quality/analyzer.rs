//! Combined per-frame quality assessment

use crate::config::QualityConfig;
use crate::quality::{framing, sharpness};
use crate::types::{Frame, QualityScore};

/// Pure, stateless quality scorer: one `QualityScore` per detection tick.
///
/// Never throws, never blocks; degenerate inputs degrade to a neutral score
/// rather than a fault.
#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    config: QualityConfig,
}

impl QualityAnalyzer {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, frame: &Frame) -> QualityScore {
        QualityScore {
            sharpness: sharpness::sharpness_score(frame, self.config.stride),
            framing_ok: framing::framing_ok(
                frame,
                self.config.stride,
                self.config.target_region_fraction,
            ),
        }
    }
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_frame_is_neutral() {
        let analyzer = QualityAnalyzer::default();
        let score = analyzer.analyze(&Frame::new(Vec::new(), 0, 0));
        assert_eq!(score.sharpness, 0.0);
        assert!(!score.framing_ok);
    }

    #[test]
    fn test_score_is_finite_and_non_negative() {
        let analyzer = QualityAnalyzer::default();
        let frame = Frame::new(vec![200u8; 32 * 32 * 3], 32, 32);
        let score = analyzer.analyze(&frame);
        assert!(score.sharpness.is_finite());
        assert!(score.sharpness >= 0.0);
    }
}
