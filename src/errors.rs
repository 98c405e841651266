use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    ConfigError(String),
    SessionError(String),
    DetectorError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PipelineError::SessionError(msg) => write!(f, "Session error: {}", msg),
            PipelineError::DetectorError(msg) => write!(f, "Detector error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}
