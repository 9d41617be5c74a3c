use thiserror::Error;

use crate::ids::{AssumptionId, ExperimentId, IdeaId};

/// Errors raised while loading or querying catalog reference data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("unknown assumption: {0}")]
    UnknownAssumption(AssumptionId),

    #[error("unknown experiment: {0}")]
    UnknownExperiment(ExperimentId),

    #[error("unknown idea: {0}")]
    UnknownIdea(IdeaId),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("catalog parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

impl CatalogError {
    /// True for lookups of ids that are not present in the active catalog.
    pub fn is_unknown_reference(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownAssumption(_)
                | CatalogError::UnknownExperiment(_)
                | CatalogError::UnknownIdea(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CatalogError::UnknownAssumption(AssumptionId::new("Z9"));
        assert_eq!(err.to_string(), "unknown assumption: Z9");
        assert!(err.is_unknown_reference());

        let err = CatalogError::DuplicateId {
            kind: "experiment",
            id: "landing-page".into(),
        };
        assert!(err.to_string().contains("landing-page"));
        assert!(!err.is_unknown_reference());
    }

    #[test]
    fn json_errors_convert_to_parse() {
        let err: CatalogError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
