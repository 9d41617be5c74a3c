//! Experiment results and learner assessments.

use serde::{Deserialize, Serialize};

use crate::ids::{AssumptionId, EntryId, ExperimentId, RoundIndex};

/// Discrete strength of the evidence a result produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    None,
    Weak,
    Strong,
}

impl Signal {
    /// Learning points awarded for this signal (2 / 1 / 0).
    pub fn learning_points(&self) -> u32 {
        match self {
            Signal::Strong => 2,
            Signal::Weak => 1,
            Signal::None => 0,
        }
    }

    /// Label under the given presentation scale.
    pub fn label(&self, scale: SignalScale) -> &'static str {
        match (scale, self) {
            (SignalScale::Strength, Signal::Strong) => "Strong",
            (SignalScale::Strength, Signal::Weak) => "Weak",
            (SignalScale::Strength, Signal::None) => "None",
            (SignalScale::Threshold, Signal::Strong) => "Pass",
            (SignalScale::Threshold, Signal::Weak) => "Borderline",
            (SignalScale::Threshold, Signal::None) => "Needs work",
        }
    }
}

/// How signals are named for the learner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalScale {
    /// None / Weak / Strong
    #[default]
    Strength,
    /// Needs work / Borderline / Pass
    Threshold,
}

/// One number inside a quantitative snippet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantFigure {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

impl QuantFigure {
    pub fn new(label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Rendered metric text plus the structured figures behind it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantSnippet {
    pub headline: String,
    #[serde(default)]
    pub figures: Vec<QuantFigure>,
}

impl QuantSnippet {
    pub fn figure(&self, label: &str) -> Option<f64> {
        self.figures
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value)
    }
}

impl std::fmt::Display for QuantSnippet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.headline)
    }
}

/// Outcome of one executed portfolio entry. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub entry_id: EntryId,
    pub round: RoundIndex,
    pub assumption_id: AssumptionId,
    pub experiment_id: ExperimentId,
    pub snippet: QuantSnippet,
    pub signal: Signal,
    pub success: bool,
    /// Fit of the experiment to the assumption at execution time.
    pub fit: f64,
    /// Probability the draw was made with. Diagnostic; do not show learners.
    pub p_success: f64,
    pub cost: u32,
    pub duration_days: u32,
}

/// Status a learner assigns to an assumption after seeing a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerStatus {
    Validated,
    Weakened,
    StillRisky,
    Invalidated,
}

impl LearnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearnerStatus::Validated => "Validated",
            LearnerStatus::Weakened => "Weakened",
            LearnerStatus::StillRisky => "Still Risky",
            LearnerStatus::Invalidated => "Invalidated",
        }
    }

    /// Whether this status is a reasonable reading of the given signal.
    pub fn agrees_with(&self, signal: Signal) -> bool {
        use LearnerStatus::*;
        match signal {
            Signal::Strong => matches!(self, Validated | Weakened),
            Signal::Weak => matches!(self, Weakened | StillRisky),
            Signal::None => matches!(self, Invalidated | StillRisky),
        }
    }
}

impl std::fmt::Display for LearnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
