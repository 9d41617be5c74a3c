//! Token ledger: admission control for scheduled experiments.
//!
//! The ledger tracks every committed entry per round so refunds return
//! exactly what was charged. Invariant: total committed cost (scheduled but
//! not yet run, plus already run) never exceeds the policy's total budget.

use std::collections::BTreeMap;

use scrappy_types::{EntryId, LedgerSnapshot, RoundBudget, RoundIndex};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::policy::BudgetPolicy;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RoundAccount {
    allotment: u32,
    carried_in: u32,
    committed: u32,
    settled: bool,
    entries: BTreeMap<EntryId, u32>,
}

impl RoundAccount {
    fn own_remaining(&self) -> u32 {
        (self.allotment + self.carried_in).saturating_sub(self.committed)
    }
}

/// Budget bookkeeping for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenLedger {
    policy: BudgetPolicy,
    accounts: Vec<RoundAccount>,
}

impl TokenLedger {
    pub fn new(policy: BudgetPolicy) -> LedgerResult<Self> {
        policy.validate()?;
        let accounts = match &policy {
            BudgetPolicy::PerRound { allotments, .. } => allotments
                .iter()
                .map(|&allotment| RoundAccount {
                    allotment,
                    ..RoundAccount::default()
                })
                .collect(),
            BudgetPolicy::Pooled { rounds, .. } => {
                vec![RoundAccount::default(); *rounds as usize]
            }
        };
        Ok(Self { policy, accounts })
    }

    pub fn policy(&self) -> &BudgetPolicy {
        &self.policy
    }

    pub fn rounds(&self) -> u32 {
        self.accounts.len() as u32
    }

    pub fn total_budget(&self) -> u32 {
        self.policy.total_budget()
    }

    /// Scheduled-but-not-run plus already-run cost, across all rounds.
    pub fn committed(&self) -> u32 {
        self.accounts.iter().map(|a| a.committed).sum()
    }

    /// Cost of settled rounds only.
    pub fn spent(&self) -> u32 {
        self.accounts
            .iter()
            .filter(|a| a.settled)
            .map(|a| a.committed)
            .sum()
    }

    fn account(&self, round: RoundIndex) -> LedgerResult<&RoundAccount> {
        if round.0 == 0 {
            return Err(LedgerError::UnknownRound(round));
        }
        self.accounts
            .get(round.position())
            .ok_or(LedgerError::UnknownRound(round))
    }

    fn account_mut(&mut self, round: RoundIndex) -> LedgerResult<&mut RoundAccount> {
        if round.0 == 0 {
            return Err(LedgerError::UnknownRound(round));
        }
        self.accounts
            .get_mut(round.position())
            .ok_or(LedgerError::UnknownRound(round))
    }

    /// Tokens still uncommitted across the whole budget. Under a per-round
    /// policy, unspent tokens of settled rounds that did not carry over are
    /// gone and not counted.
    pub fn remaining_pool(&self) -> u32 {
        match &self.policy {
            BudgetPolicy::Pooled { total, .. } => total.saturating_sub(self.committed()),
            BudgetPolicy::PerRound { .. } => self
                .accounts
                .iter()
                .filter(|a| !a.settled)
                .map(RoundAccount::own_remaining)
                .sum(),
        }
    }

    /// Tokens that can still be committed to `round`. Zero once the round
    /// is settled.
    pub fn remaining(&self, round: RoundIndex) -> LedgerResult<u32> {
        let account = self.account(round)?;
        if account.settled {
            return Ok(0);
        }
        Ok(match self.policy {
            BudgetPolicy::Pooled { .. } => self.remaining_pool(),
            BudgetPolicy::PerRound { .. } => account.own_remaining(),
        })
    }

    pub fn can_afford(&self, round: RoundIndex, cost: u32) -> bool {
        self.remaining(round)
            .map(|available| cost <= available && !self.is_settled(round))
            .unwrap_or(false)
    }

    pub fn is_settled(&self, round: RoundIndex) -> bool {
        self.account(round).map(|a| a.settled).unwrap_or(false)
    }

    /// Charge `cost` tokens for `entry` in `round`.
    ///
    /// A rejected commit leaves the ledger unchanged.
    pub fn commit(&mut self, round: RoundIndex, entry: EntryId, cost: u32) -> LedgerResult<()> {
        let account = self.account(round)?;
        if account.settled {
            return Err(LedgerError::RoundSettled(round));
        }
        if account.entries.contains_key(&entry) {
            return Err(LedgerError::DuplicateEntry { round, entry });
        }
        let available = self.remaining(round)?;
        if cost > available {
            warn!(
                round = %round,
                entry = %entry,
                requested = cost,
                available,
                "Commit rejected, insufficient tokens"
            );
            return Err(LedgerError::InsufficientTokens {
                round,
                requested: cost,
                available,
            });
        }

        let account = self.account_mut(round)?;
        account.committed += cost;
        account.entries.insert(entry, cost);

        debug!(
            round = %round,
            entry = %entry,
            cost,
            committed = self.committed(),
            remaining = self.remaining(round).unwrap_or(0),
            "Tokens committed"
        );
        Ok(())
    }

    /// Return the tokens charged for `entry`. Fails once the round settled.
    pub fn refund(&mut self, round: RoundIndex, entry: EntryId) -> LedgerResult<u32> {
        let account = self.account_mut(round)?;
        if account.settled {
            return Err(LedgerError::RoundSettled(round));
        }
        let cost = account
            .entries
            .remove(&entry)
            .ok_or(LedgerError::RefundExceedsCommitted { round, entry })?;
        account.committed = account.committed.saturating_sub(cost);

        debug!(
            round = %round,
            entry = %entry,
            refunded = cost,
            committed = self.committed(),
            "Tokens refunded"
        );
        Ok(cost)
    }

    /// Close `round` for spending. Under a carry-over policy the unspent
    /// balance moves into the next round.
    pub fn settle(&mut self, round: RoundIndex) -> LedgerResult<()> {
        let carry_over = matches!(
            self.policy,
            BudgetPolicy::PerRound {
                carry_over: true,
                ..
            }
        );
        let account = self.account_mut(round)?;
        if account.settled {
            return Err(LedgerError::RoundSettled(round));
        }
        account.settled = true;
        let leftover = account.own_remaining();
        let spent = account.committed;

        let mut carried = 0;
        if carry_over && leftover > 0 {
            if let Some(next) = self.accounts.get_mut(round.position() + 1) {
                if !next.settled {
                    next.carried_in += leftover;
                    carried = leftover;
                }
            }
        }

        debug!(
            round = %round,
            spent,
            leftover,
            carried,
            "Round settled"
        );
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let rounds = self
            .accounts
            .iter()
            .enumerate()
            .map(|(position, account)| {
                let round = RoundIndex::from_position(position);
                RoundBudget {
                    round,
                    allotment: account.allotment,
                    carried_in: account.carried_in,
                    committed: account.committed,
                    remaining: self.remaining(round).unwrap_or(0),
                    settled: account.settled,
                }
            })
            .collect();
        LedgerSnapshot {
            policy: self.policy.name().to_string(),
            total_budget: self.total_budget(),
            committed: self.committed(),
            spent: self.spent(),
            rounds,
        }
    }
}
