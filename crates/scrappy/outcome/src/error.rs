use thiserror::Error;

/// Errors from outcome-model configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OutcomeError {
    #[error("invalid {section} config: {reason}")]
    InvalidConfig {
        section: &'static str,
        reason: String,
    },
}

impl OutcomeError {
    pub(crate) fn invalid(section: &'static str, reason: impl Into<String>) -> Self {
        OutcomeError::InvalidConfig {
            section,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for outcome results.
pub type OutcomeResult<T> = Result<T, OutcomeError>;
