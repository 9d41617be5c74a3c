//! # scrappy-session
//!
//! Round orchestration and the command surface of a Scrappy Experiments
//! session.
//!
//! A [`Session`] is an explicit value owned by the caller. Learner actions are
//! plain method calls:
//!
//! - [`Session::submit_ranking`]: the learner's risk ordering
//! - [`Session::schedule`] / [`Session::unschedule`]: portfolio changes,
//!   admitted by the token ledger
//! - [`Session::execute_round`]: draw results for a round, in order
//! - [`Session::set_status`]: the learner's verdict on a result
//! - [`Session::history`], [`Session::score`], [`Session::ledger`],
//!   [`Session::elapsed_days`]: read-only views
//!
//! Results are drawn from an RNG derived from the session seed and the round
//! index, so the same seed and commands replay the same session.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod round;
pub mod session;

pub use config::{EmptyRoundPolicy, SimulationConfig};
pub use error::{SessionError, SessionResult};
pub use session::{Session, SessionId};

// Re-exported so front ends need only this crate.
pub use scrappy_ledger::BudgetPolicy;
pub use scrappy_scoring::{CategoryKind, CategoryScore, Scorecard, ScoringEngine, ScoringSpec};
