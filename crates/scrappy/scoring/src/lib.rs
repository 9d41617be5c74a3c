//! # scrappy-scoring
//!
//! Aggregates a session [`History`](scrappy_types::History) into a weighted,
//! explainable [`Scorecard`].
//!
//! Categories and weights are data ([`ScoringSpec`]); one engine evaluates
//! whatever list it is given. Every category returns a score in `[0, 100]`
//! and a deterministic reason. Scoring never mutates history and can be
//! repeated at any time.

#![deny(unsafe_code)]

pub mod categories;
pub mod engine;
pub mod error;
pub mod spec;

pub use categories::{
    is_measurable, ranking_accuracy, risk_ranks, tier_coverage, tier_size, RankingAccuracy,
    TierCoverage,
};
pub use engine::{CategoryScore, Scorecard, ScoringEngine};
pub use error::{ScoringError, ScoringResult};
pub use spec::{CategoryKind, CategoryWeight, ScoringParams, ScoringSpec};
