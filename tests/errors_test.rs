//! Error type formatting and trait coverage

use framegate::PipelineError;
use std::error::Error;

#[test]
fn test_error_display_messages() {
    let cases = [
        (
            PipelineError::ConfigError("bad stride".to_string()),
            "Configuration error: bad stride",
        ),
        (
            PipelineError::SessionError("already started".to_string()),
            "Session error: already started",
        ),
        (
            PipelineError::DetectorError("model load failed".to_string()),
            "Detector error: model load failed",
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn test_error_implements_std_error() {
    let error = PipelineError::SessionError("session is stopped".to_string());
    let dynamic: &dyn Error = &error;
    assert!(dynamic.source().is_none());
}
