//! Error types for Railboard

use thiserror::Error;

/// Core Railboard errors
#[derive(Error, Debug)]
pub enum RailboardError {
    // Malformed input
    #[error("Malformed map info: {0}")]
    MalformedMapInfo(String),

    #[error("Malformed {section} entry on line {line}: expected {expected} fields, got {actual}")]
    FieldCount {
        section: &'static str,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),

    #[error("Invalid {field} in {section} on line {line}: {value:?}")]
    InvalidNumber {
        section: &'static str,
        field: &'static str,
        line: usize,
        value: String,
    },

    #[error("Invalid time in {section} on line {line}: {value:?}")]
    InvalidStopTime {
        section: &'static str,
        line: usize,
        value: String,
    },

    #[error("Malformed level content: {0}")]
    MalformedLevelContent(String),

    // Local save errors
    #[error("No save loaded")]
    NotLoaded,

    #[error("No local save stored")]
    NoLocalSave,

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RailboardError {
    /// Whether this error rejects a save export as a whole
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            RailboardError::MalformedMapInfo(_)
                | RailboardError::FieldCount { .. }
                | RailboardError::InvalidTime(_)
                | RailboardError::InvalidNumber { .. }
                | RailboardError::InvalidStopTime { .. }
                | RailboardError::MalformedLevelContent(_)
        )
    }
}

/// Result type for Railboard operations
pub type RailboardResult<T> = Result<T, RailboardError>;
