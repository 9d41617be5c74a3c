//! # scrappy-ledger
//!
//! Token budget bookkeeping for a Scrappy Experiments session.
//!
//! The [`TokenLedger`] admits or rejects scheduled experiments against a
//! [`BudgetPolicy`]: either one allotment per round (optionally carrying
//! unspent tokens forward) or one pool shared by all rounds. Total committed
//! cost never exceeds the policy's total budget.

#![deny(unsafe_code)]

pub mod error;
pub mod ledger;
pub mod policy;

pub use error::{LedgerError, LedgerResult};
pub use ledger::TokenLedger;
pub use policy::{BudgetPolicy, MAX_ROUNDS};
