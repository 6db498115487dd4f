use thiserror::Error;

use crate::core::Slot;
use crate::services::ServiceError;

/// Retryable, user-visible game errors.
///
/// Invalid actions (opening the reserved case, accepting with no offer, ...)
/// are not errors: the machine ignores them.
#[derive(Error, Debug)]
pub enum GameError {
    /// The pool could not be loaded. The machine is back in `Idle`.
    #[error("could not load case pool: {0}")]
    LoadFailure(#[source] ServiceError),
    /// The banker could not be reached. The phase is unchanged.
    #[error("could not get banker offer: {0}")]
    OfferFailure(#[source] ServiceError),
    /// The slot is filled or a play-through is already underway.
    #[error("slot {0} is not available")]
    SlotUnavailable(Slot),
    /// A driver had no accepted move left in this phase.
    #[error("no move accepted in phase {0}")]
    Stuck(&'static str),
}

impl GameError {
    /// Can the failed operation simply be tried again?
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::LoadFailure(_) | GameError::OfferFailure(_))
    }
}
