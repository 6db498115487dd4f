//! Session context shared across play-throughs.
//!
//! A session outlives individual play-throughs: it carries the game
//! configuration, the slot being played, the seed for the next pool and the
//! roster. `GameMachine::reset_session` replaces it wholesale;
//! `GameMachine::reset_playthrough` leaves it alone.

use serde::{Deserialize, Serialize};

use super::roster::Roster;
use crate::core::{GameConfig, Slot};

/// Session-wide state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub config: GameConfig,
    /// Seed for the next pool request.
    pub seed: u64,
    /// Slot currently selected for play.
    pub slot: Option<Slot>,
    pub roster: Roster,
}

impl Session {
    /// Start a session with an empty roster and no slot selected.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            slot: None,
            roster: Roster::new(),
        }
    }

    /// Is `slot` still open for a play-through?
    #[must_use]
    pub fn is_playable(&self, slot: Slot) -> bool {
        !self.roster.is_filled(slot)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Prize, PrizeId};

    #[test]
    fn test_default_session() {
        let session = Session::default();
        assert_eq!(session.seed, 1);
        assert_eq!(session.slot, None);
        assert_eq!(session.roster.filled_count(), 0);
    }

    #[test]
    fn test_is_playable() {
        let mut session = Session::default();
        assert!(session.is_playable(Slot::PG));

        session.roster.fill(Slot::PG, Prize::new(PrizeId::new(1), "A", "B"));
        assert!(!session.is_playable(Slot::PG));
        assert!(session.is_playable(Slot::SG));
    }
}
