/// Frame quality analysis module
///
/// Provides the per-tick quality assessment feeding the capture gate:
/// stride-sampled sharpness estimation and geometric framing evaluation.
pub mod analyzer;
pub mod framing;
pub mod sharpness;

pub use analyzer::QualityAnalyzer;
pub use framing::framing_ok;
pub use sharpness::sharpness_score;
