use thiserror::Error;

use crate::core::{ParseSlotError, Slot};
use crate::pool::PoolError;

/// Error type for collaborator calls.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("reqwest error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid pool: {0}")]
    InvalidPool(#[from] PoolError),
    #[error("invalid slot: {0}")]
    InvalidSlot(#[from] ParseSlotError),
    #[error("pool was generated for {got}, expected {expected}")]
    SlotMismatch { expected: Slot, got: Slot },
    #[error("invalid offer: {0}")]
    InvalidOffer(String),
    #[error("not enough candidates for {slot}: found {found}, need {needed}")]
    NotEnoughCandidates {
        slot: Slot,
        found: usize,
        needed: usize,
    },
    #[error("tier {0} ended up empty")]
    EmptyTier(usize),
    #[error("no unopened cases to price")]
    NoRemainingCases,
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Result type for collaborator calls.
pub type Result<T> = std::result::Result<T, ServiceError>;
