//! Category evaluators.
//!
//! Each evaluator reads the history and the idea, and returns a raw score in
//! `[0, 100]` with a template reason. A zero denominator resolves to 0 and
//! sets `degenerate`.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use scrappy_types::{
    Assumption, AssumptionId, ExperimentResult, History, Idea, RiskCategory, RoundIndex, Signal,
};

use crate::spec::{CategoryKind, ScoringParams};

/// Raw result of evaluating one category.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub reason: String,
    pub degenerate: bool,
}

impl Evaluation {
    fn scored(score: f64, reason: String) -> Self {
        Self {
            score: clamp_score(score),
            reason,
            degenerate: false,
        }
    }

    fn degenerate(reason: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            reason: reason.into(),
            degenerate: true,
        }
    }
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

pub fn evaluate(
    kind: CategoryKind,
    history: &History,
    idea: &Idea,
    params: &ScoringParams,
) -> Evaluation {
    match kind {
        CategoryKind::RiskPrioritization => risk_prioritization(history, idea, params),
        CategoryKind::ExperimentFit => experiment_fit(history),
        CategoryKind::ResourceEfficiency => resource_efficiency(history, params),
        CategoryKind::LearningOutcome => learning_outcome(history, params),
        CategoryKind::AssumptionQuality => assumption_quality(history, idea, params),
        CategoryKind::EvidenceAlignment => evidence_alignment(history),
    }
}

// ── Risk Prioritization ────────────────────────────────────────────────

/// Hidden-risk rank of every assumption: 1 + number strictly riskier.
/// Ties share a rank.
pub fn risk_ranks(idea: &Idea) -> Vec<(&Assumption, usize)> {
    idea.assumptions
        .iter()
        .map(|a| {
            let severity = a.hidden_risk.severity();
            let riskier = idea
                .assumptions
                .iter()
                .filter(|b| b.hidden_risk.severity() > severity)
                .count();
            (a, riskier + 1)
        })
        .collect()
}

/// Size of the true highest-risk tier for an idea with `n` assumptions.
pub fn tier_size(n: usize, top_k: usize) -> usize {
    top_k.min(n.div_ceil(3)).max(1)
}

fn round_one_tested(history: &History) -> BTreeSet<&AssumptionId> {
    history
        .round(RoundIndex::FIRST)
        .filter(|r| r.is_executed())
        .map(|r| r.results.iter().map(|res| &res.assumption_id).collect())
        .unwrap_or_default()
}

/// Round-1 coverage of the true top tier.
#[derive(Clone, Debug, PartialEq)]
pub struct TierCoverage {
    pub k: usize,
    pub hits: usize,
    /// Proximity credit earned by tested picks that did not fill a slot.
    pub credit: f64,
}

impl TierCoverage {
    pub fn share(&self) -> f64 {
        (self.hits as f64 + self.credit) / self.k as f64
    }
}

/// Fill the `k` top-tier slots group by group, riskiest first. A tie group
/// only gets the slots left over by strictly riskier groups, so an untested
/// riskier assumption always costs a hit.
pub fn tier_coverage(
    idea: &Idea,
    tested: &BTreeSet<&AssumptionId>,
    k: usize,
    proximity_window: f64,
) -> TierCoverage {
    // rank -> (members, members tested)
    let mut groups: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for (assumption, rank) in risk_ranks(idea) {
        let group = groups.entry(rank).or_default();
        group.0 += 1;
        if tested.contains(&assumption.id) {
            group.1 += 1;
        }
    }

    let mut open = k;
    let mut hits = 0usize;
    let mut distances: Vec<usize> = Vec::new();
    for (&rank, &(members, tested_members)) in &groups {
        let slots = members.min(open);
        open -= slots;
        let credited = tested_members.min(slots);
        hits += credited;
        // Tied picks left without a slot sit one step past the tier.
        let distance = rank.saturating_sub(k).max(1);
        distances.extend(std::iter::repeat(distance).take(tested_members - credited));
    }

    distances.sort_unstable();
    let credit = distances
        .iter()
        .take(k - hits)
        .map(|&d| (1.0 - d as f64 / proximity_window).max(0.0))
        .sum();

    TierCoverage { k, hits, credit }
}

/// How close the learner placed each assumption to its true risk position.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingAccuracy {
    /// Mean closeness, 0..=1.
    pub accuracy: f64,
    /// Assumptions placed inside their true tie group.
    pub exact: usize,
    pub total: usize,
}

/// `None` when no ranking was submitted.
pub fn ranking_accuracy(
    history: &History,
    idea: &Idea,
    proximity_window: f64,
) -> Option<RankingAccuracy> {
    if history.ranking.is_empty() || idea.assumptions.is_empty() {
        return None;
    }
    let ranks = risk_ranks(idea);
    let mut closeness = 0.0;
    let mut exact = 0usize;
    for &(assumption, rank) in &ranks {
        let Some(position) = history.rank_of(&assumption.id) else {
            continue;
        };
        // Positions (0-based) the tie group occupies in a perfect ranking.
        let members = ranks.iter().filter(|(_, r)| *r == rank).count();
        let first = rank - 1;
        let last = first + members - 1;
        let distance = if position < first {
            first - position
        } else {
            position.saturating_sub(last)
        };
        if distance == 0 {
            exact += 1;
        }
        closeness += (1.0 - distance as f64 / proximity_window).max(0.0);
    }
    Some(RankingAccuracy {
        accuracy: closeness / ranks.len() as f64,
        exact,
        total: ranks.len(),
    })
}

fn risk_prioritization(history: &History, idea: &Idea, params: &ScoringParams) -> Evaluation {
    if idea.assumptions.is_empty() {
        return Evaluation::degenerate("The idea has no assumptions to prioritize.");
    }
    let k = tier_size(idea.assumptions.len(), params.top_k);
    let tested = round_one_tested(history);
    let coverage = tier_coverage(idea, &tested, k, params.proximity_window);
    let ranking = ranking_accuracy(history, idea, params.proximity_window);

    let accuracy = ranking.as_ref().map_or(0.0, |r| r.accuracy);
    let w = params.ranking_weight;
    let score = 100.0 * ((1.0 - w) * coverage.share() + w * accuracy);

    let mut reason = format!(
        "{}/{} of the true highest-risk assumptions were tested in round 1",
        coverage.hits, k
    );
    if coverage.credit > 0.0 {
        reason.push_str(&format!(
            "; near-miss picks earned {:.2} partial credit",
            coverage.credit
        ));
    }
    if tested.is_empty() {
        reason.push_str("; nothing was tested in round 1");
    }
    match &ranking {
        Some(r) => reason.push_str(&format!(
            "; ranking accuracy {:.2} ({}/{} assumptions placed at their true risk level)",
            r.accuracy, r.exact, r.total
        )),
        None => reason.push_str("; no risk ranking was submitted"),
    }
    reason.push('.');
    Evaluation::scored(score, reason)
}

// ── Experiment Fit ─────────────────────────────────────────────────────

fn experiment_fit(history: &History) -> Evaluation {
    let fits: Vec<f64> = history.results().map(|r| r.fit).collect();
    if fits.is_empty() {
        return Evaluation::degenerate("No experiments have run, so fit cannot be judged.");
    }
    let mean = fits.iter().sum::<f64>() / fits.len() as f64;
    Evaluation::scored(
        100.0 * mean,
        format!(
            "Average fit across {} experiments was {:.2}.",
            fits.len(),
            mean
        ),
    )
}

// ── Resource Efficiency ────────────────────────────────────────────────

fn resource_efficiency(history: &History, params: &ScoringParams) -> Evaluation {
    let points = history.learning_points();
    let cost = history.executed_cost();
    if points == 0 {
        return Evaluation::degenerate(format!(
            "Spent {} tokens without a learning point, so cost per point is undefined.",
            cost
        ));
    }
    let per_point = cost as f64 / points as f64;
    let ratio = if per_point > 0.0 {
        (params.target_cost_per_point / per_point).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Evaluation::scored(
        100.0 * ratio,
        format!(
            "Spent {} tokens for {} learning points ({:.2} tokens per point; target {:.2}).",
            cost, points, per_point, params.target_cost_per_point
        ),
    )
}

// ── Learning Outcome ───────────────────────────────────────────────────

fn learning_outcome(history: &History, params: &ScoringParams) -> Evaluation {
    let points = history.learning_points();
    let (strong, weak) = history
        .results()
        .fold((0, 0), |(s, w), r| match r.signal {
            Signal::Strong => (s + 1, w),
            Signal::Weak => (s, w + 1),
            Signal::None => (s, w),
        });
    let share = (points as f64 / params.learning_target as f64).min(1.0);
    Evaluation::scored(
        100.0 * share,
        format!(
            "Earned {} of {} target learning points ({} strong, {} weak signals).",
            points, params.learning_target, strong, weak
        ),
    )
}

// ── Assumption Quality ─────────────────────────────────────────────────

/// Whether an assumption's wording carries a measurable threshold.
pub fn is_measurable(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '≤' | '≥' | '<'))
}

fn assumption_quality(history: &History, idea: &Idea, params: &ScoringParams) -> Evaluation {
    let tested: BTreeSet<&AssumptionId> = history.results().map(|r| &r.assumption_id).collect();
    let assumptions: Vec<&Assumption> = idea
        .assumptions
        .iter()
        .filter(|a| tested.contains(&a.id))
        .collect();
    if assumptions.is_empty() {
        return Evaluation::degenerate("No assumptions have been tested yet.");
    }

    let specific = assumptions.iter().filter(|a| is_measurable(&a.text)).count();
    let specificity = specific as f64 / assumptions.len() as f64;

    let present = idea.categories_present();
    let covered: BTreeSet<RiskCategory> = assumptions.iter().map(|a| a.category).collect();
    let coverage = if present.is_empty() {
        0.0
    } else {
        covered.len() as f64 / present.len() as f64
    };

    let w = params.specificity_weight;
    let score = 100.0 * (w * specificity + (1.0 - w) * coverage);
    Evaluation::scored(
        score,
        format!(
            "{}/{} tested assumptions state a measurable threshold; {}/{} risk categories covered.",
            specific,
            assumptions.len(),
            covered.len(),
            present.len()
        ),
    )
}

// ── Evidence Alignment ─────────────────────────────────────────────────

fn evidence_alignment(history: &History) -> Evaluation {
    let assessed: Vec<(&ExperimentResult, bool)> = history
        .results()
        .filter_map(|r| {
            history
                .statuses
                .get(&r.entry_id)
                .map(|status| (r, status.agrees_with(r.signal)))
        })
        .collect();
    if assessed.is_empty() {
        return Evaluation::degenerate("No results have a learner verdict yet.");
    }
    let agreeing = assessed.iter().filter(|(_, agrees)| *agrees).count();
    let unique: HashSet<_> = assessed.iter().map(|(r, _)| &r.assumption_id).collect();
    Evaluation::scored(
        100.0 * agreeing as f64 / assessed.len() as f64,
        format!(
            "{}/{} learner verdicts agree with the observed signal across {} assumptions.",
            agreeing,
            assessed.len(),
            unique.len()
        ),
    )
}
