//! Session configuration.

use scrappy_ledger::BudgetPolicy;
use scrappy_outcome::{FitConfig, OutcomeConfig, RiskConfig};
use scrappy_scoring::ScoringSpec;
use scrappy_types::SignalScale;
use serde::{Deserialize, Serialize};

use crate::error::SessionResult;

/// What executing a round with no scheduled experiments does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRoundPolicy {
    /// Refuse with `InvalidTransition`.
    #[default]
    Reject,
    /// Execute to an empty result list worth zero learning points.
    Allow,
}

/// Everything a session needs besides the idea itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Master seed. Drawn at random when absent; the session records the
    /// seed it actually used.
    pub seed: Option<u64>,
    pub budget: BudgetPolicy,
    pub empty_round: EmptyRoundPolicy,
    pub signal_scale: SignalScale,
    pub fit: FitConfig,
    pub risk: RiskConfig,
    pub outcome: OutcomeConfig,
    pub scoring: ScoringSpec,
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_budget(mut self, budget: BudgetPolicy) -> Self {
        self.budget = budget;
        self
    }

    pub fn validate(&self) -> SessionResult<()> {
        self.budget.validate()?;
        self.fit.validate()?;
        self.risk.validate()?;
        self.outcome.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}
