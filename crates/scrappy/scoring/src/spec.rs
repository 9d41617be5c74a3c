//! Scoring configuration: categories, weights and parameters as data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};

/// Tolerance on the weight sum.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// The scoring categories the engine knows how to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    RiskPrioritization,
    ExperimentFit,
    ResourceEfficiency,
    LearningOutcome,
    AssumptionQuality,
    EvidenceAlignment,
}

impl CategoryKind {
    pub fn name(&self) -> &'static str {
        match self {
            CategoryKind::RiskPrioritization => "Risk Prioritization",
            CategoryKind::ExperimentFit => "Experiment Fit",
            CategoryKind::ResourceEfficiency => "Resource Efficiency",
            CategoryKind::LearningOutcome => "Learning Outcome",
            CategoryKind::AssumptionQuality => "Assumption Quality",
            CategoryKind::EvidenceAlignment => "Evidence Alignment",
        }
    }
}

/// One weighted entry of the category list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub kind: CategoryKind,
    pub weight: f64,
}

impl CategoryWeight {
    pub fn new(kind: CategoryKind, weight: f64) -> Self {
        Self { kind, weight }
    }
}

/// Tunable parameters shared by the category evaluators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Size cap of the true highest-risk tier.
    pub top_k: usize,
    /// Positions past the right place over which partial credit decays to
    /// zero. Used for near-miss round-1 picks and for ranking accuracy.
    pub proximity_window: f64,
    /// Share of Risk Prioritization given to the accuracy of the submitted
    /// ranking; the rest goes to round-1 coverage of the top tier.
    pub ranking_weight: f64,
    /// Tokens per learning point that earns a full efficiency score.
    pub target_cost_per_point: f64,
    /// Learning points that earn a full learning score.
    pub learning_target: u32,
    /// Share of assumption quality given to measurable wording; the rest
    /// goes to category coverage.
    pub specificity_weight: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            top_k: 3,
            proximity_window: 3.0,
            ranking_weight: 0.3,
            target_cost_per_point: 3.0,
            learning_target: 8,
            specificity_weight: 0.5,
        }
    }
}

/// Ordered category list plus parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSpec {
    pub categories: Vec<CategoryWeight>,
    pub params: ScoringParams,
}

impl Default for ScoringSpec {
    fn default() -> Self {
        use CategoryKind::*;
        Self {
            categories: vec![
                CategoryWeight::new(RiskPrioritization, 0.25),
                CategoryWeight::new(ExperimentFit, 0.25),
                CategoryWeight::new(ResourceEfficiency, 0.15),
                CategoryWeight::new(LearningOutcome, 0.15),
                CategoryWeight::new(AssumptionQuality, 0.20),
                CategoryWeight::new(EvidenceAlignment, 0.0),
            ],
            params: ScoringParams::default(),
        }
    }
}

impl ScoringSpec {
    /// Variant that also grades the learner's status verdicts.
    pub fn with_status_alignment() -> Self {
        use CategoryKind::*;
        Self {
            categories: vec![
                CategoryWeight::new(RiskPrioritization, 0.25),
                CategoryWeight::new(ExperimentFit, 0.25),
                CategoryWeight::new(ResourceEfficiency, 0.10),
                CategoryWeight::new(LearningOutcome, 0.10),
                CategoryWeight::new(AssumptionQuality, 0.15),
                CategoryWeight::new(EvidenceAlignment, 0.15),
            ],
            params: ScoringParams::default(),
        }
    }

    pub fn weight_of(&self, kind: CategoryKind) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.weight)
    }

    pub fn validate(&self) -> ScoringResult<()> {
        if self.categories.is_empty() {
            return Err(ScoringError::InvalidSpec(
                "at least one category is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for c in &self.categories {
            if !seen.insert(c.kind) {
                return Err(ScoringError::InvalidSpec(format!(
                    "category {} listed twice",
                    c.kind.name()
                )));
            }
            if !(c.weight >= 0.0 && c.weight.is_finite()) {
                return Err(ScoringError::InvalidSpec(format!(
                    "weight of {} must be a non-negative number, got {}",
                    c.kind.name(),
                    c.weight
                )));
            }
        }

        let sum: f64 = self.categories.iter().map(|c| c.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScoringError::InvalidSpec(format!(
                "weights must sum to 1.0, got {:.6}",
                sum
            )));
        }

        let p = &self.params;
        if p.top_k == 0 {
            return Err(ScoringError::InvalidSpec("top_k must be positive".into()));
        }
        if !(p.proximity_window > 0.0) {
            return Err(ScoringError::InvalidSpec(
                "proximity_window must be positive".into(),
            ));
        }
        if !(p.target_cost_per_point > 0.0) {
            return Err(ScoringError::InvalidSpec(
                "target_cost_per_point must be positive".into(),
            ));
        }
        if p.learning_target == 0 {
            return Err(ScoringError::InvalidSpec(
                "learning_target must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.ranking_weight) {
            return Err(ScoringError::InvalidSpec(
                "ranking_weight must be within 0..=1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.specificity_weight) {
            return Err(ScoringError::InvalidSpec(
                "specificity_weight must be within 0..=1".into(),
            ));
        }
        Ok(())
    }
}
