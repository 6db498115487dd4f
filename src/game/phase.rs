//! Play-through phases.
//!
//! The phase is a closed enum that carries exactly the data valid in it:
//! the round cursor only exists while cases are being opened or priced, and
//! a banker offer only exists inside `BankerOffer`. Leaving that phase drops
//! the offer with it.

use serde::{Deserialize, Serialize};

use super::offer::BankerOffer;
use crate::core::{CaseNumber, Prize};

/// Progress of the banker request for the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is outstanding.
    InFlight,
    /// The banker answered.
    Settled(BankerOffer),
    /// The last request failed; it may be retried.
    Failed,
}

/// How a play-through ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Took the banker's offer after `round`.
    Deal { round: usize, offer: BankerOffer },
    /// Kept the reserved case to the end.
    Kept { case: CaseNumber, prize: Prize },
    /// Swapped the reserved case for the last other case.
    Switched { case: CaseNumber, prize: Prize },
}

impl Resolution {
    /// The prize won.
    #[must_use]
    pub fn prize(&self) -> &Prize {
        match self {
            Resolution::Deal { offer, .. } => &offer.prize,
            Resolution::Kept { prize, .. } | Resolution::Switched { prize, .. } => prize,
        }
    }
}

/// Game phase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No pool loaded.
    #[default]
    Idle,
    /// Pool loaded, waiting for the player to reserve a case.
    PickReserved,
    /// Opening cases; `remaining` more to go this round.
    OpenRound { round: usize, remaining: u8 },
    /// Round `round` finished; the banker is (or will be) asked for an offer.
    BankerOffer { round: usize, offer: OfferState },
    /// All rounds declined; keep the reserved case or switch.
    FinalChoice,
    /// Prize decided and written to the roster.
    Done { resolution: Resolution },
}

impl Phase {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::PickReserved => "pick_reserved",
            Phase::OpenRound { .. } => "open_round",
            Phase::BankerOffer { .. } => "banker_offer",
            Phase::FinalChoice => "final_choice",
            Phase::Done { .. } => "done",
        }
    }

    /// Current round, for the phases that have one.
    #[must_use]
    pub fn round(&self) -> Option<usize> {
        match self {
            Phase::OpenRound { round, .. } | Phase::BankerOffer { round, .. } => Some(*round),
            _ => None,
        }
    }

    /// Is a play-through underway (pool adopted, not yet resolved)?
    #[must_use]
    pub fn in_progress(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::Done { .. })
    }

    /// The settled offer, if the phase holds one.
    #[must_use]
    pub fn offer(&self) -> Option<&BankerOffer> {
        match self {
            Phase::BankerOffer {
                offer: OfferState::Settled(offer),
                ..
            } => Some(offer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PrizeId, Tier};

    fn offer() -> BankerOffer {
        BankerOffer {
            target_tier: Tier::new(8),
            picked_tier: Tier::new(9),
            prize: Prize::new(PrizeId::new(77), "Banker Pick", "BNK"),
        }
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Idle.name(), "idle");
        assert_eq!(Phase::OpenRound { round: 0, remaining: 4 }.name(), "open_round");
        assert_eq!(Phase::FinalChoice.name(), "final_choice");
    }

    #[test]
    fn test_round_and_progress() {
        let open = Phase::OpenRound { round: 2, remaining: 1 };
        assert_eq!(open.round(), Some(2));
        assert!(open.in_progress());
        assert_eq!(Phase::PickReserved.round(), None);
        assert!(!Phase::Idle.in_progress());
    }

    #[test]
    fn test_offer_only_when_settled() {
        let pending = Phase::BankerOffer { round: 0, offer: OfferState::InFlight };
        assert!(pending.offer().is_none());

        let settled = Phase::BankerOffer { round: 0, offer: OfferState::Settled(offer()) };
        assert_eq!(settled.offer().map(|o| o.prize.id), Some(PrizeId::new(77)));
    }

    #[test]
    fn test_resolution_prize() {
        let deal = Resolution::Deal { round: 1, offer: offer() };
        assert_eq!(deal.prize().name, "Banker Pick");

        let kept = Resolution::Kept {
            case: CaseNumber::new(3),
            prize: Prize::new(PrizeId::new(1), "Kept", "TM"),
        };
        assert_eq!(kept.prize().id, PrizeId::new(1));
    }
}
