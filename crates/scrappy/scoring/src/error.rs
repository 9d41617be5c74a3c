use thiserror::Error;

/// Errors from scoring configuration. Scoring a history never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("invalid scoring spec: {0}")]
    InvalidSpec(String),
}

pub type ScoringResult<T> = Result<T, ScoringError>;
