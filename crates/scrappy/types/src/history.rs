//! Portfolio, round and session history records.
//!
//! [`History`] is the single input of the scoring engine. It is plain data:
//! cloning it and scoring the clone gives exactly the same scorecard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{AssumptionId, EntryId, ExperimentId, IdeaId, RoundIndex};
use crate::result::{ExperimentResult, LearnerStatus};

/// A scheduled (assumption, experiment) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub id: EntryId,
    pub round: RoundIndex,
    pub assumption_id: AssumptionId,
    pub experiment_id: ExperimentId,
    /// Copied from the experiment at admission time.
    pub cost: u32,
    pub duration_days: u32,
}

/// Lifecycle of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// Accepting portfolio changes.
    Open,
    /// Results fixed; terminal.
    Executed,
}

/// Portfolio and results of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub index: RoundIndex,
    pub state: RoundState,
    pub portfolio: Vec<PortfolioEntry>,
    pub results: Vec<ExperimentResult>,
}

impl RoundRecord {
    pub fn open(index: RoundIndex) -> Self {
        Self {
            index,
            state: RoundState::Open,
            portfolio: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn is_executed(&self) -> bool {
        self.state == RoundState::Executed
    }

    pub fn entry(&self, id: EntryId) -> Option<&PortfolioEntry> {
        self.portfolio.iter().find(|e| e.id == id)
    }

    pub fn result_for(&self, id: EntryId) -> Option<&ExperimentResult> {
        self.results.iter().find(|r| r.entry_id == id)
    }

    /// Tokens tied up by this round's portfolio.
    pub fn committed_cost(&self) -> u32 {
        self.portfolio.iter().map(|e| e.cost).sum()
    }

    /// Experiments in a round run side by side, so the round takes as long
    /// as its longest experiment.
    pub fn elapsed_days(&self) -> u32 {
        self.results
            .iter()
            .map(|r| r.duration_days)
            .max()
            .unwrap_or(0)
    }
}

/// Budget view of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundBudget {
    pub round: RoundIndex,
    /// Fresh tokens granted to this round (zero under a pooled policy).
    pub allotment: u32,
    /// Unspent tokens rolled in from earlier settled rounds.
    pub carried_in: u32,
    /// Cost of entries currently scheduled or already run in this round.
    pub committed: u32,
    pub remaining: u32,
    pub settled: bool,
}

/// Read-only state of the token ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// `per_round` or `pooled`.
    pub policy: String,
    pub total_budget: u32,
    /// Scheduled-but-not-run plus already-run cost.
    pub committed: u32,
    /// Cost of settled (executed) rounds only.
    pub spent: u32,
    pub rounds: Vec<RoundBudget>,
}

impl LedgerSnapshot {
    /// Tokens not yet committed anywhere.
    pub fn unused(&self) -> u32 {
        self.total_budget.saturating_sub(self.committed)
    }

    pub fn round(&self, index: RoundIndex) -> Option<&RoundBudget> {
        self.rounds.iter().find(|r| r.round == index)
    }
}

/// Everything a learner did in one session, in scoring-ready form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub idea_id: IdeaId,
    /// Learner's ordering, highest perceived risk first. Empty if none was
    /// submitted.
    pub ranking: Vec<AssumptionId>,
    pub rounds: Vec<RoundRecord>,
    #[serde(default)]
    pub statuses: BTreeMap<EntryId, LearnerStatus>,
    pub ledger: LedgerSnapshot,
}

impl History {
    pub fn round(&self, index: RoundIndex) -> Option<&RoundRecord> {
        self.rounds.iter().find(|r| r.index == index)
    }

    pub fn executed_rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.iter().filter(|r| r.is_executed())
    }

    /// All results across executed rounds, in round order.
    pub fn results(&self) -> impl Iterator<Item = &ExperimentResult> {
        self.executed_rounds().flat_map(|r| r.results.iter())
    }

    pub fn learning_points(&self) -> u32 {
        self.results().map(|r| r.signal.learning_points()).sum()
    }

    pub fn executed_cost(&self) -> u32 {
        self.results().map(|r| r.cost).sum()
    }

    /// Nominal elapsed time over executed rounds.
    pub fn elapsed_days(&self) -> u32 {
        self.executed_rounds().map(RoundRecord::elapsed_days).sum()
    }

    /// Position of an assumption in the learner's ranking (0 = riskiest).
    pub fn rank_of(&self, id: &AssumptionId) -> Option<usize> {
        self.ranking.iter().position(|a| a == id)
    }
}
