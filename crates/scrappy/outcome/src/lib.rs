//! # scrappy-outcome
//!
//! Turns a learner's (assumption, experiment) choice into a plausible result.
//!
//! - [`FitEvaluator`] scores how well an experiment targets an assumption
//!   from shared tags
//! - [`RiskModel`] maps an assumption's hidden risk to a baseline chance of
//!   success
//! - [`OutcomeSynthesizer`] combines both with bounded noise, draws success
//!   and signal, and renders a quantitative snippet
//!
//! All randomness comes from the caller's RNG. Feeding the same seeded RNG
//! the same choices reproduces the same results.

#![deny(unsafe_code)]

pub mod error;
pub mod fit;
pub mod quant;
pub mod risk;
pub mod synth;

pub use error::{OutcomeError, OutcomeResult};
pub use fit::{FitConfig, FitEvaluator};
pub use quant::{generate as generate_snippet, generator, QuantGenerator};
pub use risk::{RiskConfig, RiskModel};
pub use synth::{Outcome, OutcomeConfig, OutcomeSynthesizer};
