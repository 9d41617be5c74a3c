//! Property tests: committed cost never exceeds the total budget, whatever
//! sequence of commits, refunds and settlements is applied.

use proptest::prelude::*;
use scrappy_ledger::*;
use scrappy_types::{EntryId, RoundIndex};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Op {
    Commit { round: u32, cost: u32 },
    Refund { round: u32, entry: u64 },
    Settle { round: u32 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1u32..=4, 1u32..=6).prop_map(|(round, cost)| Op::Commit { round, cost }),
        2 => (1u32..=4, 0u64..20).prop_map(|(round, entry)| Op::Refund { round, entry }),
        1 => (1u32..=4).prop_map(|round| Op::Settle { round }),
    ]
}

fn arb_policy() -> impl Strategy<Value = BudgetPolicy> {
    prop_oneof![
        (prop::collection::vec(0u32..10, 1..4), any::<bool>()).prop_map(
            |(mut allotments, carry_over)| {
                allotments[0] += 1;
                BudgetPolicy::PerRound {
                    allotments,
                    carry_over,
                }
            }
        ),
        (1u32..30, 1u32..4).prop_map(|(total, rounds)| BudgetPolicy::Pooled { total, rounds }),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn committed_never_exceeds_total(
        policy in arb_policy(),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let mut ledger = TokenLedger::new(policy).unwrap();
        let mut next_entry = 0u64;

        for op in ops {
            let before = ledger.committed();
            match op {
                Op::Commit { round, cost } => {
                    next_entry += 1;
                    let round = RoundIndex(round);
                    let affordable = ledger.can_afford(round, cost);
                    let result = ledger.commit(round, EntryId(next_entry), cost);
                    prop_assert_eq!(result.is_ok(), affordable);
                    if result.is_err() {
                        prop_assert_eq!(ledger.committed(), before);
                    } else {
                        prop_assert_eq!(ledger.committed(), before + cost);
                    }
                }
                Op::Refund { round, entry } => {
                    if let Ok(cost) = ledger.refund(RoundIndex(round), EntryId(entry)) {
                        prop_assert_eq!(ledger.committed(), before - cost);
                    } else {
                        prop_assert_eq!(ledger.committed(), before);
                    }
                }
                Op::Settle { round } => {
                    let _ = ledger.settle(RoundIndex(round));
                    prop_assert_eq!(ledger.committed(), before);
                }
            }
            prop_assert!(ledger.committed() <= ledger.total_budget());
            prop_assert!(ledger.spent() <= ledger.committed());
        }
    }
}
