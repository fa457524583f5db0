use std::fmt;

/// Errors that can occur when reading an optional value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalError {
    /// An operation was invoked in a state that forbids it, i.e. reading the
    /// value of an absent optional
    IllegalState { reason: String },
}

impl fmt::Display for OptionalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionalError::IllegalState { reason } => {
                write!(f, "Illegal state: {}", reason)
            }
        }
    }
}

impl std::error::Error for OptionalError {}

impl OptionalError {
    /// Create an illegal state error
    pub fn illegal_state(reason: &str) -> Self {
        OptionalError::IllegalState {
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for optional accessors
pub type OptionalResult<T> = Result<T, OptionalError>;
