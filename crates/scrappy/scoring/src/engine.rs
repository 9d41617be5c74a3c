//! Scoring engine, one implementation parameterized by [`ScoringSpec`].

use scrappy_types::{History, Idea};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::categories::{clamp_score, evaluate};
use crate::error::ScoringResult;
use crate::spec::{CategoryKind, ScoringSpec};

/// Score and explanation for one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub kind: CategoryKind,
    pub name: String,
    pub weight: f64,
    /// 0..=100, before weighting.
    pub score: f64,
    pub reason: String,
    /// The category had nothing to measure and defaulted to 0.
    pub degenerate: bool,
}

impl CategoryScore {
    pub fn weighted(&self) -> f64 {
        self.weight * self.score
    }
}

/// Weighted, explainable score of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// 0..=100.
    pub total: f64,
    pub categories: Vec<CategoryScore>,
}

impl Scorecard {
    pub fn category(&self, kind: CategoryKind) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.kind == kind)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoringEngine {
    spec: ScoringSpec,
}

impl ScoringEngine {
    pub fn new(spec: ScoringSpec) -> ScoringResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> &ScoringSpec {
        &self.spec
    }

    /// Score `history` against the hidden truth of `idea`.
    ///
    /// Pure: never mutates the history, and scoring the same history twice
    /// gives identical scorecards.
    pub fn score(&self, history: &History, idea: &Idea) -> Scorecard {
        let categories: Vec<CategoryScore> = self
            .spec
            .categories
            .iter()
            .map(|c| {
                let eval = evaluate(c.kind, history, idea, &self.spec.params);
                CategoryScore {
                    kind: c.kind,
                    name: c.kind.name().to_string(),
                    weight: c.weight,
                    score: eval.score,
                    reason: eval.reason,
                    degenerate: eval.degenerate,
                }
            })
            .collect();

        let total = clamp_score(categories.iter().map(CategoryScore::weighted).sum());

        info!(
            idea = %history.idea_id,
            total,
            categories = categories.len(),
            degenerate = categories.iter().filter(|c| c.degenerate).count(),
            "Scorecard computed"
        );

        Scorecard { total, categories }
    }
}
