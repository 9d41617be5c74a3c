//! # scrappy-types
//!
//! Shared data model for the Scrappy Experiments simulation:
//!
//! - **Catalog**: ideas, assumptions (with hidden risk) and the experiment
//!   menu; immutable reference data loaded from JSON
//! - **Portfolio & rounds**: scheduled (assumption, experiment) pairs and the
//!   per-round lifecycle record
//! - **Results**: signal, success flag and quantitative snippet produced
//!   once per executed entry
//! - **History**: the complete, scoring-ready record of a session
//!
//! Nothing in this crate draws random numbers or mutates shared state.

#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod history;
pub mod ids;
pub mod result;

pub use catalog::{
    Assumption, Catalog, Experiment, HiddenRisk, Idea, PublicAssumption, QuantShape,
    RiskCategory, RiskLevel,
};
pub use error::CatalogError;
pub use history::{History, LedgerSnapshot, PortfolioEntry, RoundBudget, RoundRecord, RoundState};
pub use ids::{AssumptionId, EntryId, ExperimentId, IdeaId, RoundIndex};
pub use result::{
    ExperimentResult, LearnerStatus, QuantFigure, QuantSnippet, Signal, SignalScale,
};
