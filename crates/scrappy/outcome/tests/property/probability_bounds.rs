//! Property tests: success probability stays inside its configured bounds and
//! seeded draws are reproducible.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scrappy_outcome::*;
use scrappy_types::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const TAG_POOL: [&str; 6] = ["wtp", "pricing", "install_time", "compat", "noise", "trust"];

fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(TAG_POOL.to_vec()), 0..5)
        .prop_map(|tags| tags.into_iter().map(String::from).collect())
}

fn arb_hidden_risk() -> impl Strategy<Value = HiddenRisk> {
    prop_oneof![
        Just(HiddenRisk::Level(RiskLevel::High)),
        Just(HiddenRisk::Level(RiskLevel::Medium)),
        Just(HiddenRisk::Level(RiskLevel::Low)),
        (0.0f64..=1.0).prop_map(HiddenRisk::Truth),
    ]
}

fn arb_assumption() -> impl Strategy<Value = Assumption> {
    (
        arb_tags(),
        arb_hidden_risk(),
        prop::sample::select(RiskCategory::ALL.to_vec()),
    )
        .prop_map(|(tags, hidden_risk, category)| Assumption {
            id: AssumptionId::new("A1"),
            text: "Customers will pay $199 upfront.".into(),
            category,
            tags,
            hidden_risk,
        })
}

fn arb_experiment() -> impl Strategy<Value = Experiment> {
    (
        arb_tags(),
        prop::sample::select(QuantShape::ALL.to_vec()),
        1u32..6,
    )
        .prop_map(|(affinity_tags, quant, cost)| Experiment {
            id: ExperimentId::new("x"),
            name: "Experiment".into(),
            cost,
            duration_days: 7,
            affinity_tags,
            quant,
            description: None,
        })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every drawn probability lies in [p_min, p_max].
    #[test]
    fn drawn_probability_is_bounded(
        assumption in arb_assumption(),
        experiment in arb_experiment(),
        seed in any::<u64>(),
    ) {
        let synth = OutcomeSynthesizer::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = synth.draw(&experiment, &assumption, &mut rng);
        prop_assert!(outcome.p_success >= 0.05);
        prop_assert!(outcome.p_success <= 0.95);
        prop_assert!(outcome.fit >= 0.35 && outcome.fit <= 1.0);
        prop_assert_eq!(outcome.success, outcome.signal != Signal::None);
    }

    /// The same seed and inputs give the same outcome.
    #[test]
    fn seeded_draw_is_reproducible(
        assumption in arb_assumption(),
        experiment in arb_experiment(),
        seed in any::<u64>(),
    ) {
        let synth = OutcomeSynthesizer::default();
        let a = synth.draw(&experiment, &assumption, &mut StdRng::seed_from_u64(seed));
        let b = synth.draw(&experiment, &assumption, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }

    /// Riskier hidden truth never raises the expected probability.
    #[test]
    fn expected_probability_falls_with_risk(
        experiment in arb_experiment(),
        lo in 0.0f64..=1.0,
        hi in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let synth = OutcomeSynthesizer::default();
        let mut a = Assumption {
            id: AssumptionId::new("A1"),
            text: "Install under 20 minutes.".into(),
            category: RiskCategory::Feasibility,
            tags: vec!["install_time".into()],
            hidden_risk: HiddenRisk::Truth(lo),
        };
        let safer = synth.expected_p_success(&experiment, &a);
        a.hidden_risk = HiddenRisk::Truth(hi);
        let riskier = synth.expected_p_success(&experiment, &a);
        prop_assert!(riskier <= safer + 1e-12);
    }
}
