//! Scripted learner strategies for unattended playthroughs.

use std::collections::HashSet;

use scrappy_outcome::FitEvaluator;
use scrappy_session::{Session, SessionError};
use scrappy_types::{AssumptionId, Experiment, LearnerStatus, RoundIndex, Signal};
use tracing::debug;

/// How the scripted learner picks experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Best-fitting affordable experiment for each assumption, in ranking
    /// order.
    BestFit,
    /// Cheapest experiment for each assumption, in ranking order.
    Cheapest,
}

/// Verdict a diligent learner would give a signal.
pub fn verdict(signal: Signal) -> LearnerStatus {
    match signal {
        Signal::Strong => LearnerStatus::Validated,
        Signal::Weak => LearnerStatus::Weakened,
        Signal::None => LearnerStatus::Invalidated,
    }
}

/// Fill `round` from the ranking until nothing more is affordable.
///
/// Untested assumptions come first; assumptions whose evidence is still
/// inconclusive are retested with leftover tokens.
pub fn plan_round(
    session: &mut Session,
    round: RoundIndex,
    strategy: Strategy,
    fit: &FitEvaluator,
) -> Result<usize, SessionError> {
    let history = session.history();
    let tested: HashSet<AssumptionId> = history
        .results()
        .map(|r| r.assumption_id.clone())
        .collect();
    let settled: HashSet<AssumptionId> = history
        .results()
        .filter(|r| r.signal == Signal::Strong)
        .map(|r| r.assumption_id.clone())
        .collect();

    let order: Vec<AssumptionId> = if session.ranking().is_empty() {
        session.idea().assumption_ids()
    } else {
        session.ranking().to_vec()
    };
    let candidates: Vec<AssumptionId> = order
        .iter()
        .filter(|id| !tested.contains(*id))
        .chain(
            order
                .iter()
                .filter(|id| tested.contains(*id) && !settled.contains(*id)),
        )
        .cloned()
        .collect();

    let mut scheduled = 0;
    for assumption_id in candidates {
        let remaining = session.remaining(round)?;
        if remaining == 0 {
            break;
        }
        let idea = session.idea();
        let assumption = idea.assumption(&assumption_id)?;
        let affordable = idea.experiments.iter().filter(|e| e.cost <= remaining);
        let pick: Option<&Experiment> = match strategy {
            Strategy::BestFit => affordable.max_by(|a, b| {
                fit.fit(a, assumption)
                    .total_cmp(&fit.fit(b, assumption))
                    .then(b.cost.cmp(&a.cost))
            }),
            Strategy::Cheapest => affordable.min_by(|a, b| {
                a.cost
                    .cmp(&b.cost)
                    .then(fit.fit(b, assumption).total_cmp(&fit.fit(a, assumption)))
            }),
        };
        let Some(experiment) = pick.map(|e| e.id.clone()) else {
            continue;
        };
        let entry = session.schedule(round, &assumption_id, &experiment)?;
        debug!(round = %round, entry = %entry, assumption = %assumption_id, experiment = %experiment, "Planned");
        scheduled += 1;
    }
    Ok(scheduled)
}

/// Record a verdict for every result of an executed round.
pub fn assess_round(session: &mut Session, round: RoundIndex) -> Result<(), SessionError> {
    let verdicts: Vec<_> = session
        .round(round)
        .map(|r| {
            r.results
                .iter()
                .map(|res| (res.entry_id, verdict(res.signal)))
                .collect()
        })
        .unwrap_or_default();
    for (entry, status) in verdicts {
        session.set_status(round, entry, status)?;
    }
    Ok(())
}
