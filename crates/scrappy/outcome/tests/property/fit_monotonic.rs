//! Property tests: adding a shared tag never lowers fit.

use proptest::prelude::*;
use scrappy_outcome::*;
use scrappy_types::*;

fn assumption(tags: Vec<String>) -> Assumption {
    Assumption {
        id: AssumptionId::new("A1"),
        text: "Renters accept a 90-day pilot.".into(),
        category: RiskCategory::Viability,
        tags,
        hidden_risk: HiddenRisk::Level(RiskLevel::Medium),
    }
}

fn experiment(affinity_tags: Vec<String>) -> Experiment {
    Experiment {
        id: ExperimentId::new("concierge"),
        name: "Concierge Pilot".into(),
        cost: 3,
        duration_days: 14,
        affinity_tags,
        quant: QuantShape::UsageLog,
        description: None,
    }
}

proptest! {
    #[test]
    fn extra_shared_tag_never_lowers_fit(
        shared in prop::collection::vec("[a-z]{3,8}", 0..6),
        extra in "[a-z]{3,8}",
    ) {
        let eval = FitEvaluator::default();
        let before = eval.fit(&experiment(shared.clone()), &assumption(shared.clone()));

        let mut more = shared.clone();
        more.push(extra.clone());
        let after = eval.fit(&experiment(more.clone()), &assumption(more));

        prop_assert!(after >= before);
        prop_assert!(after <= 1.0);
    }

    #[test]
    fn fit_stays_in_range(
        a_tags in prop::collection::vec("[a-z]{2,5}", 0..8),
        e_tags in prop::collection::vec("[a-z]{2,5}", 0..8),
    ) {
        let fit = FitEvaluator::default().fit(&experiment(e_tags), &assumption(a_tags));
        prop_assert!((0.35..=1.0).contains(&fit));
    }
}
