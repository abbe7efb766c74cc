//! Error types for drone_missions

use thiserror::Error;

use crate::common::types::Waypoint;

/// Main error type for mission planning and execution
#[derive(Debug, Error)]
pub enum MissionError {
    /// Invalid argument (spacing, size, pattern name, speed, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Position outside the configured safe flight volume
    #[error("Boundary violation: {0} is outside the safe flight volume")]
    BoundaryViolation(Waypoint),
    /// Battery too low to start a mission
    #[error("Insufficient battery: {level}% (threshold {threshold}%)")]
    LowBattery { level: u8, threshold: u8 },
    /// The drone rejected or failed a command
    #[error("Command error: {0}")]
    CommandError(String),
    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Visualization error
    #[error("Visualization error: {0}")]
    VisualizationError(String),
    /// Logger already initialised
    #[error("Logger error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

impl MissionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MissionError::InvalidArgument(msg.into())
    }
}

/// Result type alias for mission operations
pub type MissionResult<T> = Result<T, MissionError>;
