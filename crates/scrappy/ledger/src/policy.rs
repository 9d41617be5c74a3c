//! Budget policies.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Most rounds a session may span.
pub const MAX_ROUNDS: u32 = 64;

/// How tokens are granted across rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetPolicy {
    /// Each round has its own allotment. With `carry_over`, whatever a
    /// settled round left unspent rolls into the next round; otherwise it is
    /// lost.
    PerRound {
        allotments: Vec<u32>,
        #[serde(default)]
        carry_over: bool,
    },
    /// One running total shared by every round.
    Pooled { total: u32, rounds: u32 },
}

impl Default for BudgetPolicy {
    /// Use-it-or-lose-it caps of 8, 4 and 4 tokens.
    fn default() -> Self {
        BudgetPolicy::PerRound {
            allotments: vec![8, 4, 4],
            carry_over: false,
        }
    }
}

impl BudgetPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            BudgetPolicy::PerRound { .. } => "per_round",
            BudgetPolicy::Pooled { .. } => "pooled",
        }
    }

    /// Number of rounds the policy covers.
    pub fn rounds(&self) -> u32 {
        match self {
            BudgetPolicy::PerRound { allotments, .. } => allotments.len() as u32,
            BudgetPolicy::Pooled { rounds, .. } => *rounds,
        }
    }

    /// Every token the learner can ever spend.
    pub fn total_budget(&self) -> u32 {
        match self {
            BudgetPolicy::PerRound { allotments, .. } => allotments.iter().sum(),
            BudgetPolicy::Pooled { total, .. } => *total,
        }
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.rounds() == 0 {
            return Err(LedgerError::InvalidPolicy(
                "at least one round is required".into(),
            ));
        }
        if self.rounds() > MAX_ROUNDS {
            return Err(LedgerError::InvalidPolicy(format!(
                "{} rounds requested, at most {} are supported",
                self.rounds(),
                MAX_ROUNDS
            )));
        }
        if let BudgetPolicy::PerRound { allotments, .. } = self {
            if allotments
                .iter()
                .try_fold(0u32, |acc, a| acc.checked_add(*a))
                .is_none()
            {
                return Err(LedgerError::InvalidPolicy(
                    "allotments overflow the token counter".into(),
                ));
            }
        }
        if self.total_budget() == 0 {
            return Err(LedgerError::InvalidPolicy(
                "total budget must be positive".into(),
            ));
        }
        Ok(())
    }
}
