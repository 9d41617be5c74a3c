//! Session: the explicit command surface a front end drives.
//!
//! A [`Session`] owns one idea, one ledger and the round records. Every
//! command is a synchronous `&mut self` call that either succeeds or leaves
//! the session exactly as it was.

use std::collections::{BTreeMap, HashSet};

use scrappy_ledger::TokenLedger;
use scrappy_outcome::OutcomeSynthesizer;
use scrappy_scoring::{Scorecard, ScoringEngine};
use scrappy_types::{
    AssumptionId, Catalog, EntryId, ExperimentId, ExperimentResult, History, Idea, IdeaId,
    LearnerStatus, LedgerSnapshot, PortfolioEntry, PublicAssumption, RoundIndex, RoundRecord,
    RoundState,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{EmptyRoundPolicy, SimulationConfig};
use crate::error::{SessionError, SessionResult};
use crate::round;

/// Unique identifier for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// One learner's playthrough of one idea.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    seed: u64,
    config: SimulationConfig,
    idea: Idea,
    synthesizer: OutcomeSynthesizer,
    scoring: ScoringEngine,
    ledger: TokenLedger,
    rounds: Vec<RoundRecord>,
    ranking: Vec<AssumptionId>,
    statuses: BTreeMap<EntryId, LearnerStatus>,
    next_entry: u64,
}

impl Session {
    /// Start a session on `idea`. Configuration is validated once, here.
    pub fn new(idea: Idea, config: SimulationConfig) -> SessionResult<Self> {
        idea.validate().map_err(|e| SessionError::Config(e.to_string()))?;
        config.validate()?;

        let synthesizer = OutcomeSynthesizer::new(
            config.fit.clone(),
            config.risk.clone(),
            config.outcome.clone(),
        )?;
        let scoring = ScoringEngine::new(config.scoring.clone())?;
        let ledger = TokenLedger::new(config.budget.clone())?;
        let rounds = (0..ledger.rounds() as usize)
            .map(|p| RoundRecord::open(RoundIndex::from_position(p)))
            .collect();
        let seed = config.seed.unwrap_or_else(rand::random);
        let id = SessionId::new();

        info!(
            session = %id,
            idea = %idea.id,
            seed,
            rounds = ledger.rounds(),
            budget = ledger.total_budget(),
            policy = ledger.policy().name(),
            "Session started"
        );

        Ok(Self {
            id,
            seed,
            config,
            idea,
            synthesizer,
            scoring,
            ledger,
            rounds,
            ranking: Vec::new(),
            statuses: BTreeMap::new(),
            next_entry: 1,
        })
    }

    /// Start a session on the idea `idea_id` of a loaded catalog.
    pub fn from_catalog(
        catalog: &Catalog,
        idea_id: &IdeaId,
        config: SimulationConfig,
    ) -> SessionResult<Self> {
        let idea = catalog.idea(idea_id)?.clone();
        Self::new(idea, config)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The seed actually in use; pass it back through the config to replay.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn idea(&self) -> &Idea {
        &self.idea
    }

    /// Assumptions as the learner may see them.
    pub fn public_assumptions(&self) -> Vec<PublicAssumption> {
        self.idea
            .assumptions
            .iter()
            .map(|a| a.public_view())
            .collect()
    }

    pub fn ranking(&self) -> &[AssumptionId] {
        &self.ranking
    }

    pub fn round(&self, index: RoundIndex) -> Option<&RoundRecord> {
        if index.0 == 0 {
            return None;
        }
        self.rounds.get(index.position())
    }

    fn round_checked(&self, index: RoundIndex) -> SessionResult<&RoundRecord> {
        self.round(index).ok_or(SessionError::UnknownRound(index))
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// First round that has not executed yet; `None` once all have.
    pub fn current_round(&self) -> Option<RoundIndex> {
        self.rounds
            .iter()
            .find(|r| !r.is_executed())
            .map(|r| r.index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_round().is_none()
    }

    pub fn remaining(&self, round: RoundIndex) -> SessionResult<u32> {
        Ok(self.ledger.remaining(round)?)
    }

    // ── Commands ───────────────────────────────────────────────────────

    /// Record the learner's risk ordering, riskiest first.
    ///
    /// Must be a permutation of the idea's assumption ids. May be replaced
    /// until round 1 executes.
    pub fn submit_ranking(&mut self, ranking: Vec<AssumptionId>) -> SessionResult<()> {
        if self.round_checked(RoundIndex::FIRST)?.is_executed() {
            return Err(self.reject(SessionError::InvalidTransition(
                "ranking is locked once round 1 has executed".into(),
            )));
        }

        let mut seen = HashSet::with_capacity(ranking.len());
        for id in &ranking {
            if self.idea.assumption(id).is_err() {
                return Err(self.reject(SessionError::InvalidRanking(format!(
                    "{} is not an assumption of {}",
                    id, self.idea.id
                ))));
            }
            if !seen.insert(id) {
                return Err(
                    self.reject(SessionError::InvalidRanking(format!("{} ranked twice", id)))
                );
            }
        }
        if ranking.len() != self.idea.assumptions.len() {
            return Err(self.reject(SessionError::InvalidRanking(format!(
                "ranked {} of {} assumptions",
                ranking.len(),
                self.idea.assumptions.len()
            ))));
        }

        debug!(session = %self.id, ranked = ranking.len(), "Ranking submitted");
        self.ranking = ranking;
        Ok(())
    }

    /// Add an (assumption, experiment) pair to an open round, charging its
    /// cost to the ledger.
    pub fn schedule(
        &mut self,
        round: RoundIndex,
        assumption: &AssumptionId,
        experiment: &ExperimentId,
    ) -> SessionResult<EntryId> {
        if self.round_checked(round)?.is_executed() {
            return Err(self.reject(SessionError::InvalidTransition(format!(
                "cannot schedule into {}: it has already executed",
                round
            ))));
        }
        self.idea
            .assumption(assumption)
            .map_err(|e| self.reject(e.into()))?;
        let exp = self
            .idea
            .experiment(experiment)
            .map_err(|e| self.reject(e.into()))?;
        let (cost, duration_days) = (exp.cost, exp.duration_days);

        let id = EntryId(self.next_entry);
        self.ledger
            .commit(round, id, cost)
            .map_err(|e| self.reject(e.into()))?;
        self.next_entry += 1;

        let entry = PortfolioEntry {
            id,
            round,
            assumption_id: assumption.clone(),
            experiment_id: experiment.clone(),
            cost,
            duration_days,
        };
        self.rounds[round.position()].portfolio.push(entry);

        debug!(
            session = %self.id,
            round = %round,
            entry = %id,
            assumption = %assumption,
            experiment = %experiment,
            cost,
            "Experiment scheduled"
        );
        Ok(id)
    }

    /// Remove an entry from an open round and refund its cost.
    pub fn unschedule(&mut self, round: RoundIndex, entry: EntryId) -> SessionResult<PortfolioEntry> {
        let record = self.round_checked(round)?;
        if record.is_executed() {
            return Err(self.reject(SessionError::InvalidTransition(format!(
                "cannot unschedule from {}: it has already executed",
                round
            ))));
        }
        let position = record
            .portfolio
            .iter()
            .position(|e| e.id == entry)
            .ok_or(SessionError::UnknownEntry { round, entry })
            .map_err(|e| self.reject(e))?;

        // Refund first: if it fails the portfolio is left untouched.
        let refunded = self
            .ledger
            .refund(round, entry)
            .map_err(|e| self.reject(e.into()))?;
        let removed = self.rounds[round.position()].portfolio.remove(position);

        debug!(
            session = %self.id,
            round = %round,
            entry = %entry,
            refunded,
            "Experiment unscheduled"
        );
        Ok(removed)
    }

    /// Run every experiment scheduled in `round` and fix its results.
    ///
    /// Rounds execute in ascending order, each exactly once.
    pub fn execute_round(&mut self, round: RoundIndex) -> SessionResult<&[ExperimentResult]> {
        let record = self.round_checked(round)?;
        if record.is_executed() {
            return Err(self.reject(SessionError::InvalidTransition(format!(
                "{} has already executed",
                round
            ))));
        }
        if self.current_round() != Some(round) {
            return Err(self.reject(SessionError::InvalidTransition(format!(
                "{} cannot execute before earlier rounds",
                round
            ))));
        }
        if record.portfolio.is_empty() && self.config.empty_round == EmptyRoundPolicy::Reject {
            return Err(self.reject(SessionError::InvalidTransition(format!(
                "{} has no scheduled experiments",
                round
            ))));
        }

        let results = round::draw_results(record, &self.idea, &self.synthesizer, self.seed)
            .map_err(|e| self.reject(e))?;
        self.ledger.settle(round).map_err(|e| self.reject(e.into()))?;

        let record = &mut self.rounds[round.position()];
        record.results = results;
        record.state = RoundState::Executed;

        let record = &self.rounds[round.position()];
        info!(
            session = %self.id,
            round = %round,
            experiments = record.results.len(),
            successes = record.results.iter().filter(|r| r.success).count(),
            learning_points = record
                .results
                .iter()
                .map(|r| r.signal.learning_points())
                .sum::<u32>(),
            elapsed_days = record.elapsed_days(),
            "Round executed"
        );
        Ok(&record.results)
    }

    /// Tag an executed result with the learner's verdict. May be changed
    /// later; never alters the result itself.
    pub fn set_status(
        &mut self,
        round: RoundIndex,
        entry: EntryId,
        status: LearnerStatus,
    ) -> SessionResult<()> {
        let record = self.round_checked(round)?;
        if !record.is_executed() {
            return Err(self.reject(SessionError::InvalidTransition(format!(
                "{} has not executed yet",
                round
            ))));
        }
        if record.result_for(entry).is_none() {
            return Err(self.reject(SessionError::UnknownEntry { round, entry }));
        }
        self.statuses.insert(entry, status);
        debug!(session = %self.id, round = %round, entry = %entry, status = %status, "Status set");
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Scoring-ready record of everything done so far.
    pub fn history(&self) -> History {
        History {
            idea_id: self.idea.id.clone(),
            ranking: self.ranking.clone(),
            rounds: self.rounds.clone(),
            statuses: self.statuses.clone(),
            ledger: self.ledger.snapshot(),
        }
    }

    /// Score the history so far. Can be called any number of times.
    pub fn score(&self) -> Scorecard {
        self.scoring.score(&self.history(), &self.idea)
    }

    pub fn ledger(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// Nominal days elapsed over executed rounds.
    pub fn elapsed_days(&self) -> u32 {
        self.rounds
            .iter()
            .filter(|r| r.is_executed())
            .map(RoundRecord::elapsed_days)
            .sum()
    }

    fn reject(&self, err: SessionError) -> SessionError {
        warn!(session = %self.id, error = %err, "Command rejected");
        err
    }
}
