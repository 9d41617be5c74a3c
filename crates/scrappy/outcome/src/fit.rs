//! Fit evaluator: how well an experiment targets an assumption.

use scrappy_types::{Assumption, Experiment};
use serde::{Deserialize, Serialize};

use crate::error::{OutcomeError, OutcomeResult};

/// Fit constants: `fit = min(1, base + per_tag × overlap)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Fit of a completely untargeted experiment. Must stay above zero.
    pub base: f64,
    /// Added per shared tag.
    pub per_tag: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            base: 0.35,
            per_tag: 0.20,
        }
    }
}

impl FitConfig {
    pub fn validate(&self) -> OutcomeResult<()> {
        if !(self.base > 0.0 && self.base <= 1.0) {
            return Err(OutcomeError::invalid(
                "fit",
                format!("base {} must be in (0, 1]", self.base),
            ));
        }
        if !(self.per_tag >= 0.0 && self.per_tag.is_finite()) {
            return Err(OutcomeError::invalid(
                "fit",
                format!("per_tag {} must be a non-negative number", self.per_tag),
            ));
        }
        Ok(())
    }
}

/// Computes fit between experiments and assumptions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitEvaluator {
    config: FitConfig,
}

impl FitEvaluator {
    pub fn new(config: FitConfig) -> OutcomeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Number of distinct experiment affinity tags found in the assumption's
    /// type/tag set.
    pub fn overlap(experiment: &Experiment, assumption: &Assumption) -> usize {
        let targets = assumption.type_tags();
        let mut seen: Vec<&str> = Vec::with_capacity(experiment.affinity_tags.len());
        for tag in &experiment.affinity_tags {
            let tag = tag.as_str();
            if targets.contains(tag) && !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        seen.len()
    }

    /// Fit from a raw overlap count.
    pub fn fit_for_overlap(&self, overlap: usize) -> f64 {
        (self.config.base + self.config.per_tag * overlap as f64).min(1.0)
    }

    /// Fit in `[base, 1]`.
    pub fn fit(&self, experiment: &Experiment, assumption: &Assumption) -> f64 {
        self.fit_for_overlap(Self::overlap(experiment, assumption))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrappy_types::{
        AssumptionId, ExperimentId, HiddenRisk, QuantShape, RiskCategory, RiskLevel,
    };

    fn assumption(tags: &[&str]) -> Assumption {
        Assumption {
            id: AssumptionId::new("A1"),
            text: "Homeowners will pay $249.".into(),
            category: RiskCategory::Desirability,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            hidden_risk: HiddenRisk::Level(RiskLevel::Medium),
        }
    }

    fn experiment(tags: &[&str]) -> Experiment {
        Experiment {
            id: ExperimentId::new("preorder"),
            name: "Pre-Order Test".into(),
            cost: 4,
            duration_days: 14,
            affinity_tags: tags.iter().map(|t| t.to_string()).collect(),
            quant: QuantShape::Conversion,
            description: None,
        }
    }

    #[test]
    fn no_overlap_gives_base() {
        let eval = FitEvaluator::default();
        let fit = eval.fit(&experiment(&["install_time"]), &assumption(&["wtp"]));
        assert!((fit - 0.35).abs() < 1e-12);
    }

    #[test]
    fn each_shared_tag_adds_increment() {
        let eval = FitEvaluator::default();
        let a = assumption(&["wtp", "pricing"]);
        assert!((eval.fit(&experiment(&["wtp"]), &a) - 0.55).abs() < 1e-12);
        assert!((eval.fit(&experiment(&["wtp", "pricing"]), &a) - 0.75).abs() < 1e-12);
        // Category counts as a tag.
        let fit = eval.fit(&experiment(&["wtp", "pricing", "desirability"]), &a);
        assert!((fit - 0.95).abs() < 1e-12);
    }

    #[test]
    fn fit_clamps_at_one() {
        let eval = FitEvaluator::default();
        let a = assumption(&["a", "b", "c", "d"]);
        let fit = eval.fit(&experiment(&["a", "b", "c", "d", "desirability"]), &a);
        assert_eq!(fit, 1.0);
    }

    #[test]
    fn duplicate_affinity_tags_count_once() {
        let a = assumption(&["wtp"]);
        assert_eq!(FitEvaluator::overlap(&experiment(&["wtp", "wtp"]), &a), 1);
    }

    #[test]
    fn zero_base_rejected() {
        let config = FitConfig {
            base: 0.0,
            per_tag: 0.2,
        };
        assert!(FitEvaluator::new(config).is_err());
    }
}
