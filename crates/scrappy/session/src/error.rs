use scrappy_ledger::LedgerError;
use scrappy_outcome::OutcomeError;
use scrappy_scoring::ScoringError;
use scrappy_types::{CatalogError, EntryId, RoundIndex};
use thiserror::Error;

/// Errors returned by session commands. A failed command leaves the session
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("insufficient tokens in {round}: requested {requested}, available {available}")]
    InsufficientTokens {
        round: RoundIndex,
        requested: u32,
        available: u32,
    },

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("unknown reference: {0}")]
    UnknownReference(#[from] CatalogError),

    #[error("unknown round: {0}")]
    UnknownRound(RoundIndex),

    #[error("invalid ranking: {0}")]
    InvalidRanking(String),

    #[error("unknown entry {entry} in {round}")]
    UnknownEntry { round: RoundIndex, entry: EntryId },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for SessionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientTokens {
                round,
                requested,
                available,
            } => SessionError::InsufficientTokens {
                round,
                requested,
                available,
            },
            LedgerError::UnknownRound(round) => SessionError::UnknownRound(round),
            LedgerError::RoundSettled(round) => {
                SessionError::InvalidTransition(format!("{} has already executed", round))
            }
            LedgerError::InvalidPolicy(reason) => SessionError::Config(reason),
            other => SessionError::Ledger(other),
        }
    }
}

impl From<OutcomeError> for SessionError {
    fn from(err: OutcomeError) -> Self {
        SessionError::Config(err.to_string())
    }
}

impl From<ScoringError> for SessionError {
    fn from(err: ScoringError) -> Self {
        SessionError::Config(err.to_string())
    }
}

/// Convenience type alias for session results.
pub type SessionResult<T> = Result<T, SessionError>;
