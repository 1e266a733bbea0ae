//! Domain error types

use crate::case::state::Phase;
use crate::case::side::Side;
use thiserror::Error;

/// Caller protocol violations and validation failures.
///
/// These are rejected synchronously, before any backend call, and always
/// leave the case untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliberationError {
    #[error("Operation '{operation}' is not allowed in phase {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("{side} has already used all {max} argument rounds")]
    RoundLimitExceeded { side: Side, max: u32 },

    #[error("{0} has already submitted")]
    DuplicateSubmission(Side),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DeliberationError {
    pub fn invalid_phase(operation: &'static str, phase: Phase) -> Self {
        DeliberationError::InvalidPhase { operation, phase }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DeliberationError::Validation(message.into())
    }

    /// Stable error code for the request/response surface.
    pub fn code(&self) -> &'static str {
        match self {
            DeliberationError::InvalidPhase { .. } => "invalid_phase",
            DeliberationError::RoundLimitExceeded { .. } => "round_limit_exceeded",
            DeliberationError::DuplicateSubmission(_) => "duplicate_submission",
            DeliberationError::Validation(_) => "validation_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_limit_display() {
        let error = DeliberationError::RoundLimitExceeded {
            side: Side::A,
            max: 5,
        };
        assert_eq!(
            error.to_string(),
            "Side A has already used all 5 argument rounds"
        );
    }

    #[test]
    fn test_invalid_phase_display() {
        let error = DeliberationError::invalid_phase("conclude", Phase::Concluded);
        assert_eq!(
            error.to_string(),
            "Operation 'conclude' is not allowed in phase CONCLUDED"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DeliberationError::DuplicateSubmission(Side::B).code(),
            "duplicate_submission"
        );
        assert_eq!(
            DeliberationError::validation("empty").code(),
            "validation_error"
        );
    }
}
