//! The game state machine.
//!
//! `GameMachine` owns one session and at most one play-through. It performs
//! no I/O: the two collaborator calls are split into a `begin_*` step that
//! hands back a request and a `finish_*` step that takes the result. While a
//! request is outstanding the matching `begin_*` returns `None`, so repeated
//! triggers never issue a second request.
//!
//! Invalid actions return `false` (or `None`) and leave the state untouched.
//!
//! ## Flow
//!
//! ```text
//! Idle -> PickReserved -> OpenRound -> BankerOffer -> OpenRound ... -> FinalChoice -> Done
//!                                           \-> Done (deal)
//! ```
//!
//! Round completion (`OpenRound` with nothing left to open) is not handled
//! inside `open_case`. It is a separate reaction, `react()`, which `apply`
//! runs once after every command.

use im::Vector;
use tracing::{debug, info, warn};

use super::command::{Command, CommandRecord};
use super::error::GameError;
use super::offer::{request_seed, target_tier, BankerOffer, OfferRequest};
use super::phase::{OfferState, Phase, Resolution};
use super::session::Session;
use crate::core::{Case, CaseNumber, ConfigError, Slot, Tier};
use crate::pool::{CasePool, OpenedCases, PoolError};
use crate::services::ServiceError;

/// A pending pool request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolRequest {
    pub seed: u64,
    pub slot: Slot,
}

/// Game state machine for one session.
#[derive(Debug)]
pub struct GameMachine {
    session: Session,

    // === Play-through ===
    pool: Option<CasePool>,
    opened: OpenedCases,
    reserved: Option<CaseNumber>,
    last_opened: Option<CaseNumber>,
    phase: Phase,

    // === Requests ===
    loading: bool,
    last_error: Option<GameError>,

    history: Vector<CommandRecord>,
}

impl GameMachine {
    /// Create a machine for `session`.
    pub fn new(session: Session) -> Result<Self, ConfigError> {
        session.config.validate()?;
        Ok(Self {
            session,
            pool: None,
            opened: OpenedCases::new(),
            reserved: None,
            last_opened: None,
            phase: Phase::Idle,
            loading: false,
            last_error: None,
            history: Vector::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn pool(&self) -> Option<&CasePool> {
        self.pool.as_ref()
    }

    #[must_use]
    pub fn opened(&self) -> &OpenedCases {
        &self.opened
    }

    #[must_use]
    pub fn reserved(&self) -> Option<CaseNumber> {
        self.reserved
    }

    /// The most recently opened case.
    #[must_use]
    pub fn last_opened(&self) -> Option<&Case> {
        let number = self.last_opened?;
        self.pool.as_ref()?.get(number)
    }

    /// The settled banker offer, if any.
    #[must_use]
    pub fn offer(&self) -> Option<&BankerOffer> {
        self.phase.offer()
    }

    /// Is a pool request outstanding?
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Is a banker request outstanding?
    #[must_use]
    pub fn is_offer_in_flight(&self) -> bool {
        matches!(
            self.phase,
            Phase::BankerOffer {
                offer: OfferState::InFlight,
                ..
            }
        )
    }

    /// The last retryable error, if it has not been cleared.
    #[must_use]
    pub fn last_error(&self) -> Option<&GameError> {
        self.last_error.as_ref()
    }

    /// Take ownership of the last error.
    pub fn take_error(&mut self) -> Option<GameError> {
        self.last_error.take()
    }

    /// Commands accepted this session.
    #[must_use]
    pub fn history(&self) -> &Vector<CommandRecord> {
        &self.history
    }

    /// Unopened cases, the reserved one included.
    #[must_use]
    pub fn remaining_cases(&self) -> Vec<&Case> {
        self.pool
            .as_ref()
            .map(|pool| pool.unopened_cases(&self.opened).collect())
            .unwrap_or_default()
    }

    /// The single unopened case besides the reserved one, once it exists.
    #[must_use]
    pub fn other_unopened_case(&self) -> Option<&Case> {
        let reserved = self.reserved?;
        self.pool
            .as_ref()?
            .other_unopened_case(&self.opened, reserved)
    }

    /// Target tier the banker would be asked for right now.
    #[must_use]
    pub fn current_target_tier(&self) -> Option<Tier> {
        let pool = self.pool.as_ref()?;
        let config = &self.session.config;
        target_tier(pool.unopened_tiers(&self.opened), config.min_tier, config.max_tier)
    }

    // === Commands ===

    /// Apply a command, then run the round-completion reaction once.
    ///
    /// Returns whether the command was accepted.
    pub fn apply(&mut self, command: Command) -> bool {
        let round = self.phase.round();
        let accepted = match command {
            Command::SelectSlot(slot) => self.select_slot(slot),
            Command::SetSeed(seed) => self.set_seed(seed),
            Command::Reserve(number) => self.reserve_case(number),
            Command::Open(number) => self.open_case(number),
            Command::AcceptOffer => self.accept_offer(),
            Command::DeclineOffer => self.decline_offer(),
            Command::KeepReserved => self.keep_reserved(),
            Command::SwitchToOther => self.switch_to_other(),
            Command::ResetPlaythrough => self.reset_playthrough(),
            Command::ResetSession => self.reset_session(),
        };

        if accepted {
            let sequence = self.history.len() as u32;
            self.history
                .push_back(CommandRecord::new(command, round, sequence));
        }
        self.react();
        accepted
    }

    /// Choose the slot the next pool is generated for.
    pub fn select_slot(&mut self, slot: Slot) -> bool {
        if self.loading || self.phase.in_progress() {
            debug!(%slot, phase = self.phase.name(), "slot change rejected mid play-through");
            return false;
        }
        if !self.session.is_playable(slot) {
            debug!(%slot, "slot already filled");
            return false;
        }
        if matches!(self.phase, Phase::Done { .. }) {
            self.clear_playthrough();
        }
        self.session.slot = Some(slot);
        true
    }

    /// Set the seed for the next pool request.
    pub fn set_seed(&mut self, seed: u64) -> bool {
        if self.loading || self.phase.in_progress() {
            debug!(seed, "seed change rejected mid play-through");
            return false;
        }
        self.session.seed = seed;
        true
    }

    // === Pool loading ===

    /// Start a pool request for the selected slot.
    ///
    /// Returns `None` if a request is already outstanding, no playable slot
    /// is selected, or a play-through is underway.
    pub fn begin_load(&mut self) -> Option<PoolRequest> {
        if self.loading {
            debug!("pool request already in flight");
            return None;
        }
        if self.phase.in_progress() {
            debug!(phase = self.phase.name(), "pool request rejected mid play-through");
            return None;
        }
        let Some(slot) = self.session.slot else {
            debug!("pool request without a selected slot");
            return None;
        };
        if !self.session.is_playable(slot) {
            debug!(%slot, "pool request for a filled slot");
            return None;
        }

        self.loading = true;
        self.last_error = None;
        info!(%slot, seed = self.session.seed, "requesting case pool");
        Some(PoolRequest {
            seed: self.session.seed,
            slot,
        })
    }

    /// Deliver the result of the outstanding pool request.
    ///
    /// Returns true if the pool was adopted. On failure the machine is back
    /// in `Idle` with a `LoadFailure` recorded.
    pub fn finish_load(&mut self, result: Result<CasePool, ServiceError>) -> bool {
        if !self.loading {
            debug!("stale pool result ignored");
            return false;
        }
        self.loading = false;

        let checked = result.and_then(|pool| self.check_pool(&pool).map(|()| pool));
        match checked {
            Ok(pool) => {
                self.adopt(pool);
                true
            }
            Err(err) => {
                warn!(error = %err, "case pool load failed");
                self.clear_playthrough();
                self.last_error = Some(GameError::LoadFailure(err));
                false
            }
        }
    }

    /// Adopt an already-fetched pool and enter `PickReserved`.
    ///
    /// Rejected while loading or mid play-through, for a filled slot, or for
    /// a pool that does not fit the session.
    pub fn start(&mut self, pool: CasePool) -> bool {
        if self.loading || self.phase.in_progress() {
            debug!(phase = self.phase.name(), "start rejected");
            return false;
        }
        if !self.session.is_playable(pool.slot()) {
            debug!(slot = %pool.slot(), "start rejected: slot already filled");
            return false;
        }
        if let Err(err) = self.check_pool(&pool) {
            debug!(error = %err, "start rejected");
            return false;
        }
        self.adopt(pool);
        true
    }

    fn check_pool(&self, pool: &CasePool) -> Result<(), ServiceError> {
        if let Some(expected) = self.session.slot {
            if pool.slot() != expected {
                return Err(ServiceError::SlotMismatch {
                    expected,
                    got: pool.slot(),
                });
            }
        }
        let expected = self.session.config.pool_size;
        if pool.len() != expected {
            return Err(PoolError::WrongSize {
                expected,
                got: pool.len(),
            }
            .into());
        }
        Ok(())
    }

    fn adopt(&mut self, pool: CasePool) {
        self.clear_playthrough();
        self.last_error = None;
        self.session.slot = Some(pool.slot());
        info!(
            slot = %pool.slot(),
            season = pool.season(),
            seed = pool.seed(),
            "case pool loaded"
        );
        self.pool = Some(pool);
        self.phase = Phase::PickReserved;
    }

    fn clear_playthrough(&mut self) {
        self.pool = None;
        self.opened = OpenedCases::new();
        self.reserved = None;
        self.last_opened = None;
        self.phase = Phase::Idle;
    }

    // === Opening cases ===

    /// Reserve the player's case and start round one.
    pub fn reserve_case(&mut self, number: CaseNumber) -> bool {
        if self.phase != Phase::PickReserved {
            debug!(case = %number, phase = self.phase.name(), "reserve rejected");
            return false;
        }
        if !self.pool.as_ref().is_some_and(|pool| pool.contains(number)) {
            debug!(case = %number, "reserve rejected: no such case");
            return false;
        }
        let Some(batch) = self.session.config.batch(0) else {
            return false;
        };

        self.reserved = Some(number);
        self.phase = Phase::OpenRound {
            round: 0,
            remaining: batch,
        };
        info!(case = %number, "case reserved");
        true
    }

    /// Open a case.
    ///
    /// Before a case is reserved this reserves it instead.
    pub fn open_case(&mut self, number: CaseNumber) -> bool {
        let (round, remaining) = match self.phase {
            Phase::PickReserved => return self.reserve_case(number),
            Phase::OpenRound { round, remaining } => (round, remaining),
            _ => {
                debug!(case = %number, phase = self.phase.name(), "open rejected");
                return false;
            }
        };

        let known = self.pool.as_ref().is_some_and(|pool| pool.contains(number));
        if remaining == 0
            || !known
            || self.reserved == Some(number)
            || self.opened.contains(number)
        {
            debug!(case = %number, remaining, "open rejected");
            return false;
        }

        self.opened.insert(number);
        self.last_opened = Some(number);
        self.phase = Phase::OpenRound {
            round,
            remaining: remaining.saturating_sub(1),
        };
        debug!(case = %number, round, remaining = remaining - 1, "case opened");
        true
    }

    /// Round-completion reaction.
    ///
    /// Moves a finished `OpenRound` into `BankerOffer`. Returns whether it
    /// fired.
    pub fn react(&mut self) -> bool {
        let Phase::OpenRound { round, remaining: 0 } = self.phase else {
            return false;
        };
        self.phase = Phase::BankerOffer {
            round,
            offer: OfferState::Idle,
        };
        info!(round = round + 1, "round complete");
        true
    }

    // === Banker ===

    /// Start a banker request for the current round.
    ///
    /// Returns `None` outside `BankerOffer`, while a request is in flight,
    /// or once an offer has settled.
    pub fn begin_offer(&mut self) -> Option<OfferRequest> {
        let round = match self.phase {
            Phase::BankerOffer {
                round,
                offer: OfferState::Idle | OfferState::Failed,
            } => round,
            Phase::BankerOffer { .. } => {
                debug!("banker request already made this round");
                return None;
            }
            _ => {
                debug!(phase = self.phase.name(), "banker request rejected");
                return None;
            }
        };
        let pool = self.pool.as_ref()?;
        let config = &self.session.config;

        let tiers = pool.unopened_tiers(&self.opened);
        let Some(target) = target_tier(tiers, config.min_tier, config.max_tier) else {
            warn!(round, "no unopened cases to price");
            self.phase = Phase::BankerOffer {
                round,
                offer: OfferState::Failed,
            };
            self.last_error = Some(GameError::OfferFailure(ServiceError::NoRemainingCases));
            return None;
        };

        let request = OfferRequest {
            slot: pool.slot(),
            target_tier: target,
            seed: request_seed(pool.seed(), round),
            exclude: pool.prize_ids(),
        };
        self.phase = Phase::BankerOffer {
            round,
            offer: OfferState::InFlight,
        };
        self.last_error = None;
        info!(round = round + 1, target = %target, seed = request.seed, "requesting banker offer");
        Some(request)
    }

    /// Deliver the result of the outstanding banker request.
    ///
    /// Returns true if an offer settled. On failure the phase stays
    /// `BankerOffer` and `begin_offer` may be called again.
    pub fn finish_offer(&mut self, result: Result<BankerOffer, ServiceError>) -> bool {
        let Phase::BankerOffer {
            round,
            offer: OfferState::InFlight,
        } = self.phase
        else {
            debug!("stale banker result ignored");
            return false;
        };

        let checked = result.and_then(|offer| self.check_offer(&offer).map(|()| offer));
        match checked {
            Ok(offer) => {
                info!(
                    round = round + 1,
                    target = %offer.target_tier,
                    picked = %offer.picked_tier,
                    prize = %offer.prize,
                    "banker offer"
                );
                self.phase = Phase::BankerOffer {
                    round,
                    offer: OfferState::Settled(offer),
                };
                true
            }
            Err(err) => {
                warn!(round = round + 1, error = %err, "banker offer failed");
                self.phase = Phase::BankerOffer {
                    round,
                    offer: OfferState::Failed,
                };
                self.last_error = Some(GameError::OfferFailure(err));
                false
            }
        }
    }

    fn check_offer(&self, offer: &BankerOffer) -> Result<(), ServiceError> {
        let visible = self
            .pool
            .as_ref()
            .is_some_and(|pool| pool.prize_ids().contains(&offer.prize.id));
        if visible {
            return Err(ServiceError::InvalidOffer(format!(
                "{} is already in the pool",
                offer.prize
            )));
        }
        Ok(())
    }

    /// Take the settled offer. Ends the play-through.
    pub fn accept_offer(&mut self) -> bool {
        let (round, offer) = match &self.phase {
            Phase::BankerOffer {
                round,
                offer: OfferState::Settled(offer),
            } => (*round, offer.clone()),
            _ => {
                debug!(phase = self.phase.name(), "accept rejected: no settled offer");
                return false;
            }
        };
        let Some(slot) = self.session.slot else {
            return false;
        };
        if !self.session.roster.fill(slot, offer.prize.clone()) {
            debug!(%slot, "accept rejected: slot already filled");
            return false;
        }

        info!(%slot, prize = %offer.prize, round = round + 1, "deal");
        self.phase = Phase::Done {
            resolution: Resolution::Deal { round, offer },
        };
        true
    }

    /// Turn the offer down and move on.
    pub fn decline_offer(&mut self) -> bool {
        let round = match self.phase {
            Phase::BankerOffer { round, .. } => round,
            _ => {
                debug!(phase = self.phase.name(), "decline rejected");
                return false;
            }
        };

        let config = &self.session.config;
        if config.is_last_round(round) {
            info!(round = round + 1, "no deal, final choice");
            self.phase = Phase::FinalChoice;
        } else {
            let Some(batch) = config.batch(round + 1) else {
                return false;
            };
            info!(round = round + 1, "no deal");
            self.phase = Phase::OpenRound {
                round: round + 1,
                remaining: batch,
            };
        }
        true
    }

    // === Final choice ===

    /// Keep the reserved case. Ends the play-through.
    pub fn keep_reserved(&mut self) -> bool {
        self.resolve_final(false)
    }

    /// Swap the reserved case for the last other case. Ends the play-through.
    pub fn switch_to_other(&mut self) -> bool {
        self.resolve_final(true)
    }

    fn resolve_final(&mut self, switch: bool) -> bool {
        if self.phase != Phase::FinalChoice {
            debug!(phase = self.phase.name(), switch, "final choice rejected");
            return false;
        }
        let (Some(pool), Some(reserved), Some(slot)) =
            (self.pool.as_ref(), self.reserved, self.session.slot)
        else {
            return false;
        };
        let Some(other) = pool.other_unopened_case(&self.opened, reserved) else {
            debug!("final choice rejected: not exactly one other case");
            return false;
        };

        let chosen = if switch { other.number } else { reserved };
        let Some(prize) = pool.get(chosen).map(|case| case.prize.clone()) else {
            return false;
        };
        if !self.session.roster.fill(slot, prize.clone()) {
            debug!(%slot, "final choice rejected: slot already filled");
            return false;
        }

        self.opened.insert(chosen);
        self.last_opened = Some(chosen);
        info!(%slot, case = %chosen, prize = %prize, switch, "final case opened");
        let resolution = if switch {
            Resolution::Switched { case: chosen, prize }
        } else {
            Resolution::Kept { case: chosen, prize }
        };
        self.phase = Phase::Done { resolution };
        true
    }

    // === Resets ===

    /// Drop the play-through, keep the roster.
    pub fn reset_playthrough(&mut self) -> bool {
        self.clear_playthrough();
        self.loading = false;
        self.last_error = None;
        if let Some(slot) = self.session.slot {
            if !self.session.is_playable(slot) {
                self.session.slot = None;
            }
        }
        info!("play-through reset");
        true
    }

    /// Start a fresh session: empty roster, no slot selected.
    pub fn reset_session(&mut self) -> bool {
        let config = self.session.config.clone();
        let seed = self.session.seed;
        self.session = Session::new(config, seed);
        self.clear_playthrough();
        self.loading = false;
        self.last_error = None;
        self.history.clear();
        info!("session reset");
        true
    }
}
