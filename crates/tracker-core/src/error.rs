use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt document at {location}: {reason}")]
    Corrupt { location: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TrackerError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::NotFound(_))
    }
}
