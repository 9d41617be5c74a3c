use scrappy_types::{EntryId, RoundIndex};
use thiserror::Error;

/// Errors from the token ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient tokens in {round}: requested {requested}, available {available}")]
    InsufficientTokens {
        round: RoundIndex,
        requested: u32,
        available: u32,
    },

    #[error("unknown round: {0}")]
    UnknownRound(RoundIndex),

    #[error("round {0} is already settled")]
    RoundSettled(RoundIndex),

    #[error("entry {entry} holds no committed tokens in {round}")]
    RefundExceedsCommitted { round: RoundIndex, entry: EntryId },

    #[error("entry {entry} is already committed in {round}")]
    DuplicateEntry { round: RoundIndex, entry: EntryId },

    #[error("invalid budget policy: {0}")]
    InvalidPolicy(String),
}

/// Convenience type alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;
