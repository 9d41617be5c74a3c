//! Outcome synthesizer: fabricates a believable result for one
//! (assumption, experiment) choice.
//!
//! Draw order is fixed (noise, success, signal, snippet) so a seeded RNG
//! always reproduces the same result for the same inputs.

use rand::Rng;
use scrappy_types::{
    Assumption, Experiment, ExperimentResult, PortfolioEntry, QuantSnippet, Signal,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutcomeError, OutcomeResult};
use crate::fit::{FitConfig, FitEvaluator};
use crate::quant;
use crate::risk::{RiskConfig, RiskModel};

/// Probability shaping and signal constants.
///
/// `p_success = clamp(baseline + bias + fit_weight × fit + noise, p_min, p_max)`
/// with `noise ~ U(-noise_amplitude, +noise_amplitude)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    pub fit_weight: f64,
    pub bias: f64,
    pub noise_amplitude: f64,
    /// Hard floor; keeps every assumption testable.
    pub p_min: f64,
    /// Hard ceiling; no experiment is a sure thing.
    pub p_max: f64,
    /// Chance a success is `Strong` at fit 0.
    pub strong_base: f64,
    /// Extra chance of `Strong` per unit of fit.
    pub strong_fit_weight: f64,
    /// Signal reported for a failed draw (`none` or `weak`).
    pub failure_signal: Signal,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            fit_weight: 0.25,
            bias: -0.10,
            noise_amplitude: 0.08,
            p_min: 0.05,
            p_max: 0.95,
            strong_base: 0.20,
            strong_fit_weight: 0.60,
            failure_signal: Signal::None,
        }
    }
}

impl OutcomeConfig {
    pub fn validate(&self) -> OutcomeResult<()> {
        if !(self.p_min > 0.0 && self.p_max < 1.0 && self.p_min < self.p_max) {
            return Err(OutcomeError::invalid(
                "outcome",
                format!(
                    "need 0 < p_min < p_max < 1, got p_min={} p_max={}",
                    self.p_min, self.p_max
                ),
            ));
        }
        if !(self.noise_amplitude >= 0.0 && self.noise_amplitude.is_finite()) {
            return Err(OutcomeError::invalid(
                "outcome",
                "noise_amplitude must be a non-negative number",
            ));
        }
        if !(self.fit_weight.is_finite() && self.bias.is_finite()) {
            return Err(OutcomeError::invalid(
                "outcome",
                "fit_weight and bias must be finite",
            ));
        }
        if self.failure_signal == Signal::Strong {
            return Err(OutcomeError::invalid(
                "outcome",
                "a failed draw cannot report a strong signal",
            ));
        }
        Ok(())
    }

    /// Deterministic part of the probability formula, clamped.
    pub fn p_success(&self, baseline: f64, fit: f64, noise: f64) -> f64 {
        (baseline + self.bias + self.fit_weight * fit + noise).clamp(self.p_min, self.p_max)
    }

    /// Probability that a success is reported as `Strong`.
    pub fn strong_probability(&self, fit: f64) -> f64 {
        (self.strong_base + self.strong_fit_weight * fit).clamp(0.0, 1.0)
    }
}

/// Everything drawn for one choice, before it is tied to a portfolio entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub fit: f64,
    pub p_success: f64,
    pub success: bool,
    pub signal: Signal,
    pub snippet: QuantSnippet,
}

/// Combines fit, hidden risk and controlled randomness into results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutcomeSynthesizer {
    fit: FitEvaluator,
    risk: RiskModel,
    config: OutcomeConfig,
}

impl OutcomeSynthesizer {
    pub fn new(
        fit: FitConfig,
        risk: RiskConfig,
        config: OutcomeConfig,
    ) -> OutcomeResult<Self> {
        config.validate()?;
        Ok(Self {
            fit: FitEvaluator::new(fit)?,
            risk: RiskModel::new(risk)?,
            config,
        })
    }

    pub fn fit_evaluator(&self) -> &FitEvaluator {
        &self.fit
    }

    pub fn risk_model(&self) -> &RiskModel {
        &self.risk
    }

    pub fn config(&self) -> &OutcomeConfig {
        &self.config
    }

    /// Success probability with zero noise; the centre the draws vary around.
    pub fn expected_p_success(&self, experiment: &Experiment, assumption: &Assumption) -> f64 {
        let fit = self.fit.fit(experiment, assumption);
        self.config.p_success(self.risk.baseline(assumption), fit, 0.0)
    }

    /// Draw an outcome for `experiment` run against `assumption`.
    pub fn draw<R: Rng>(
        &self,
        experiment: &Experiment,
        assumption: &Assumption,
        rng: &mut R,
    ) -> Outcome {
        let fit = self.fit.fit(experiment, assumption);
        let baseline = self.risk.baseline(assumption);

        let amp = self.config.noise_amplitude;
        let noise = if amp > 0.0 {
            rng.gen_range(-amp..=amp)
        } else {
            0.0
        };
        let p_success = self.config.p_success(baseline, fit, noise);
        let success = rng.gen_bool(p_success);

        let signal = if success {
            if rng.gen_bool(self.config.strong_probability(fit)) {
                Signal::Strong
            } else {
                Signal::Weak
            }
        } else {
            self.config.failure_signal
        };

        let snippet = quant::generate(experiment.quant, p_success, rng);

        debug!(
            experiment = %experiment.id,
            assumption = %assumption.id,
            fit,
            baseline,
            p_success,
            success,
            signal = ?signal,
            "Outcome drawn"
        );

        Outcome {
            fit,
            p_success,
            success,
            signal,
            snippet,
        }
    }

    /// Produce the immutable result for an executed portfolio entry.
    pub fn synthesize<R: Rng>(
        &self,
        entry: &PortfolioEntry,
        experiment: &Experiment,
        assumption: &Assumption,
        rng: &mut R,
    ) -> ExperimentResult {
        let outcome = self.draw(experiment, assumption, rng);
        ExperimentResult {
            entry_id: entry.id,
            round: entry.round,
            assumption_id: entry.assumption_id.clone(),
            experiment_id: entry.experiment_id.clone(),
            snippet: outcome.snippet,
            signal: outcome.signal,
            success: outcome.success,
            fit: outcome.fit,
            p_success: outcome.p_success,
            cost: entry.cost,
            duration_days: entry.duration_days,
        }
    }
}
