//! Property tests: every category and the total stay inside [0, 100], and
//! scoring the same history twice gives the same scorecard.

use std::collections::BTreeMap;

use proptest::prelude::*;
use scrappy_scoring::*;
use scrappy_types::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn idea(n: usize) -> Idea {
    let levels = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];
    Idea {
        id: IdeaId::new("idea"),
        title: "Idea".into(),
        description: String::new(),
        assumptions: (0..n)
            .map(|i| Assumption {
                id: AssumptionId::new(format!("A{}", i)),
                text: if i % 2 == 0 {
                    format!("At least {}% will convert", 10 + i)
                } else {
                    "Customers care".into()
                },
                category: RiskCategory::ALL[i % 3],
                tags: vec![],
                hidden_risk: HiddenRisk::Level(levels[i % 3]),
            })
            .collect(),
        experiments: vec![Experiment {
            id: ExperimentId::new("x"),
            name: "X".into(),
            cost: 1,
            duration_days: 3,
            affinity_tags: vec![],
            quant: QuantShape::Lift,
            description: None,
        }],
    }
}

fn arb_signal() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::None), Just(Signal::Weak), Just(Signal::Strong)]
}

fn arb_status() -> impl Strategy<Value = Option<LearnerStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(LearnerStatus::Validated)),
        Just(Some(LearnerStatus::Weakened)),
        Just(Some(LearnerStatus::StillRisky)),
        Just(Some(LearnerStatus::Invalidated)),
    ]
}

type RawResult = (u32, usize, Signal, f64, u32, Option<LearnerStatus>);

fn arb_results() -> impl Strategy<Value = Vec<RawResult>> {
    prop::collection::vec(
        (1u32..=3, 0usize..12, arb_signal(), 0.35f64..=1.0, 1u32..6, arb_status()),
        0..12,
    )
}

fn build_history(n: usize, raw: Vec<RawResult>, ranking: Vec<usize>) -> History {
    let mut rounds: Vec<RoundRecord> = (1..=3).map(|i| RoundRecord::open(RoundIndex(i))).collect();
    let mut statuses = BTreeMap::new();
    for (i, (round, a, signal, fit, cost, status)) in raw.into_iter().enumerate() {
        let entry = EntryId(i as u64 + 1);
        let record = &mut rounds[(round - 1) as usize];
        record.state = RoundState::Executed;
        record.results.push(ExperimentResult {
            entry_id: entry,
            round: RoundIndex(round),
            assumption_id: AssumptionId::new(format!("A{}", a % n)),
            experiment_id: ExperimentId::new("x"),
            snippet: QuantSnippet {
                headline: "-".into(),
                figures: vec![],
            },
            signal,
            success: signal != Signal::None,
            fit,
            p_success: 0.5,
            cost,
            duration_days: 3,
        });
        if let Some(status) = status {
            statuses.insert(entry, status);
        }
    }
    History {
        idea_id: IdeaId::new("idea"),
        ranking: ranking
            .into_iter()
            .map(|i| AssumptionId::new(format!("A{}", i)))
            .collect(),
        rounds,
        statuses,
        ledger: LedgerSnapshot {
            policy: "pooled".into(),
            total_budget: 40,
            committed: 0,
            spent: 0,
            rounds: vec![],
        },
    }
}

/// No ranking, or a shuffled permutation of the idea's assumptions.
fn arb_ranking(n: usize) -> impl Strategy<Value = Vec<usize>> {
    prop_oneof![Just(vec![]), Just((0..n).collect::<Vec<_>>()).prop_shuffle()]
}

fn arb_spec() -> impl Strategy<Value = ScoringSpec> {
    prop_oneof![
        Just(ScoringSpec::default()),
        Just(ScoringSpec::with_status_alignment()),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scores_stay_in_bounds(
        (n, ranking) in (1usize..12).prop_flat_map(|n| (Just(n), arb_ranking(n))),
        raw in arb_results(),
        spec in arb_spec(),
    ) {
        let idea = idea(n);
        let history = build_history(n, raw, ranking);
        let card = ScoringEngine::new(spec).unwrap().score(&history, &idea);

        prop_assert!((0.0..=100.0).contains(&card.total));
        for c in &card.categories {
            prop_assert!((0.0..=100.0).contains(&c.score), "{} = {}", c.name, c.score);
            prop_assert!(!c.reason.is_empty());
            if c.degenerate {
                prop_assert_eq!(c.score, 0.0);
            }
        }
    }

    #[test]
    fn scoring_is_idempotent(
        (n, ranking) in (1usize..12).prop_flat_map(|n| (Just(n), arb_ranking(n))),
        raw in arb_results(),
    ) {
        let idea = idea(n);
        let history = build_history(n, raw, ranking);
        let snapshot = history.clone();
        let engine = ScoringEngine::default();
        let first = engine.score(&history, &idea);
        let second = engine.score(&history, &idea);
        prop_assert_eq!(first, second);
        prop_assert_eq!(history, snapshot);
    }
}
