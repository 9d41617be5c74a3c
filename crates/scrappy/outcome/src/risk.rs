//! Risk model: maps hidden risk to a chance-of-success baseline.
//!
//! Riskier assumptions are harder to validate: their baseline is lower and
//! their difficulty (`1 - baseline`) higher. The mapping reads only static
//! catalog data.

use scrappy_types::{Assumption, HiddenRisk, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::error::{OutcomeError, OutcomeResult};

/// Baselines per level, plus the linear mapping for continuous truth values:
/// `baseline = truth_intercept - truth_slope × truth`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub truth_intercept: f64,
    pub truth_slope: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high: 0.35,
            medium: 0.55,
            low: 0.75,
            truth_intercept: 0.55,
            truth_slope: 0.25,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> OutcomeResult<()> {
        for (name, value) in [("high", self.high), ("medium", self.medium), ("low", self.low)] {
            if !(value > 0.0 && value < 1.0) {
                return Err(OutcomeError::invalid(
                    "risk",
                    format!("{} baseline {} must be in (0, 1)", name, value),
                ));
            }
        }
        if !(self.high <= self.medium && self.medium <= self.low) {
            return Err(OutcomeError::invalid(
                "risk",
                "baselines must not increase with risk (high <= medium <= low)",
            ));
        }
        if !(self.truth_slope >= 0.0) {
            return Err(OutcomeError::invalid("risk", "truth_slope must be >= 0"));
        }
        let worst = self.truth_intercept - self.truth_slope;
        if !(worst > 0.0 && self.truth_intercept < 1.0) {
            return Err(OutcomeError::invalid(
                "risk",
                format!(
                    "truth mapping must stay in (0, 1); got [{:.3}, {:.3}]",
                    worst, self.truth_intercept
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskModel {
    config: RiskConfig,
}

impl RiskModel {
    pub fn new(config: RiskConfig) -> OutcomeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn baseline_for(&self, risk: &HiddenRisk) -> f64 {
        match risk {
            HiddenRisk::Level(RiskLevel::High) => self.config.high,
            HiddenRisk::Level(RiskLevel::Medium) => self.config.medium,
            HiddenRisk::Level(RiskLevel::Low) => self.config.low,
            HiddenRisk::Truth(t) => {
                self.config.truth_intercept - self.config.truth_slope * t.clamp(0.0, 1.0)
            }
        }
    }

    /// Chance-of-success baseline for validating `assumption`.
    pub fn baseline(&self, assumption: &Assumption) -> f64 {
        self.baseline_for(&assumption.hidden_risk)
    }

    /// Difficulty of validation in (0, 1); increases with hidden risk.
    pub fn difficulty(&self, assumption: &Assumption) -> f64 {
        1.0 - self.baseline(assumption)
    }
}
