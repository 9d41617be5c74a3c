//! Property tests: any sequence of learner commands keeps the ledger inside
//! its budget, never changes an executed round, and a rejected command
//! leaves the session untouched.

use std::collections::BTreeMap;

use proptest::prelude::*;
use scrappy_session::*;
use scrappy_types::*;

const CATALOG: &str = include_str!("../../../../../data/thermaloop.json");

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Command {
    Schedule {
        round: u32,
        assumption: usize,
        experiment: usize,
    },
    Unschedule {
        round: u32,
        nth: usize,
    },
    Execute {
        round: u32,
    },
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        5 => (1u32..=4, 0usize..10, 0usize..8).prop_map(|(round, assumption, experiment)| {
            Command::Schedule { round, assumption, experiment }
        }),
        2 => (1u32..=3, 0usize..4).prop_map(|(round, nth)| Command::Unschedule { round, nth }),
        2 => (1u32..=3).prop_map(|round| Command::Execute { round }),
    ]
}

fn arb_budget() -> impl Strategy<Value = BudgetPolicy> {
    prop_oneof![
        any::<bool>().prop_map(|carry_over| BudgetPolicy::PerRound {
            allotments: vec![8, 4, 4],
            carry_over,
        }),
        (4u32..20).prop_map(|total| BudgetPolicy::Pooled { total, rounds: 3 }),
    ]
}

fn arb_empty_round() -> impl Strategy<Value = EmptyRoundPolicy> {
    prop_oneof![Just(EmptyRoundPolicy::Reject), Just(EmptyRoundPolicy::Allow)]
}

fn new_session(seed: u64, budget: BudgetPolicy, empty_round: EmptyRoundPolicy) -> Session {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let config = SimulationConfig {
        empty_round,
        ..SimulationConfig::default().with_seed(seed).with_budget(budget)
    };
    Session::from_catalog(&catalog, &IdeaId::new("home_kit"), config).unwrap()
}

fn apply(session: &mut Session, command: &Command) -> bool {
    match *command {
        Command::Schedule {
            round,
            assumption,
            experiment,
        } => {
            let assumption = session.idea().assumptions[assumption].id.clone();
            let experiment = session.idea().experiments[experiment].id.clone();
            session
                .schedule(RoundIndex(round), &assumption, &experiment)
                .is_ok()
        }
        Command::Unschedule { round, nth } => {
            let entry = session
                .round(RoundIndex(round))
                .and_then(|r| r.portfolio.get(nth))
                .map(|e| e.id)
                .unwrap_or(EntryId(u64::MAX));
            session.unschedule(RoundIndex(round), entry).is_ok()
        }
        Command::Execute { round } => session.execute_round(RoundIndex(round)).is_ok(),
    }
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn commands_respect_budget_and_executed_rounds(
        seed in any::<u64>(),
        budget in arb_budget(),
        empty_round in arb_empty_round(),
        commands in prop::collection::vec(arb_command(), 1..40),
    ) {
        let mut session = new_session(seed, budget, empty_round);
        let mut executed: BTreeMap<RoundIndex, RoundRecord> = BTreeMap::new();

        for command in &commands {
            let before = session.history();
            let accepted = apply(&mut session, command);
            if !accepted {
                prop_assert_eq!(&session.history(), &before, "{:?} changed state", command);
            }

            let ledger = session.ledger();
            prop_assert!(ledger.committed <= ledger.total_budget);
            prop_assert!(ledger.spent <= ledger.committed);

            for record in session.rounds() {
                if let Some(frozen) = executed.get(&record.index) {
                    prop_assert_eq!(frozen, record);
                } else if record.is_executed() {
                    executed.insert(record.index, record.clone());
                }
            }
        }
    }

    #[test]
    fn replaying_commands_reproduces_history(
        seed in any::<u64>(),
        commands in prop::collection::vec(arb_command(), 1..30),
    ) {
        let play = || {
            let mut session = new_session(seed, BudgetPolicy::default(), EmptyRoundPolicy::Reject);
            for command in &commands {
                apply(&mut session, command);
            }
            (session.history(), session.score())
        };
        let (first_history, first_card) = play();
        let (second_history, second_card) = play();
        prop_assert_eq!(first_history, second_history);
        prop_assert_eq!(first_card, second_card);
    }
}
