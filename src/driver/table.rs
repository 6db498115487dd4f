//! The table: a game machine wired to a backend.
//!
//! `Table` performs the awaits the machine cannot. Each collaborator call is
//! bracketed by the machine's `begin_*` / `finish_*` pair, so the machine
//! decides whether a request is issued at all and what to do with the
//! answer.

use tracing::{info, warn};

use super::strategy::Strategy;
use crate::core::Slot;
use crate::game::{Command, GameError, GameMachine, OfferState, Phase, Resolution, Roster};
use crate::services::{OfferGenerator, PoolGenerator};

/// Default number of tries for each collaborator call.
pub const DEFAULT_ATTEMPTS: usize = 3;

/// A game machine and the backend serving it.
#[derive(Debug)]
pub struct Table<B> {
    machine: GameMachine,
    backend: B,
    attempts: usize,
}

impl<B> Table<B>
where
    B: PoolGenerator + OfferGenerator,
{
    pub fn new(machine: GameMachine, backend: B) -> Self {
        Self {
            machine,
            backend,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Tries per collaborator call before giving up (at least one).
    #[must_use]
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn machine(&self) -> &GameMachine {
        &self.machine
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Apply a synchronous command.
    pub fn apply(&mut self, command: Command) -> bool {
        self.machine.apply(command)
    }

    /// Fetch and adopt a pool for the selected slot.
    ///
    /// Returns false if no request was issued or the load failed; the
    /// failure is left in `machine().last_error()`.
    pub async fn load_pool(&mut self) -> bool {
        let Some(request) = self.machine.begin_load() else {
            return false;
        };
        let result = self.backend.generate(request.seed, request.slot).await;
        self.machine.finish_load(result)
    }

    /// Ask the banker for this round's offer.
    pub async fn request_offer(&mut self) -> bool {
        let Some(request) = self.machine.begin_offer() else {
            return false;
        };
        let result = self.backend.offer(&request).await;
        self.machine.finish_offer(result)
    }

    /// Play one slot from selection to resolution.
    pub async fn play_slot<S: Strategy>(
        &mut self,
        slot: Slot,
        strategy: &mut S,
    ) -> Result<Resolution, GameError> {
        if !self.machine.apply(Command::SelectSlot(slot)) {
            return Err(GameError::SlotUnavailable(slot));
        }

        let mut failures = 0;
        while !self.load_pool().await {
            failures += 1;
            let err = self.machine.take_error();
            if failures >= self.attempts {
                return Err(err.unwrap_or(GameError::SlotUnavailable(slot)));
            }
            warn!(%slot, attempt = failures, "retrying pool load");
        }

        loop {
            let phase = self.machine.phase().clone();
            let command = match phase {
                Phase::Done { resolution } => {
                    info!(%slot, prize = %resolution.prize(), "slot drafted");
                    return Ok(resolution);
                }
                Phase::Idle => return Err(GameError::Stuck(phase.name())),
                Phase::PickReserved => {
                    let Some(pool) = self.machine.pool() else {
                        return Err(GameError::Stuck(phase.name()));
                    };
                    Command::Reserve(strategy.reserve(pool))
                }
                Phase::OpenRound { .. } => match strategy.next_open(&self.machine) {
                    Some(case) => Command::Open(case),
                    None => return Err(GameError::Stuck(phase.name())),
                },
                Phase::BankerOffer {
                    offer: OfferState::Settled(ref offer),
                    ..
                } => {
                    if strategy.take_deal(offer, &self.machine) {
                        Command::AcceptOffer
                    } else {
                        Command::DeclineOffer
                    }
                }
                Phase::BankerOffer { .. } => {
                    self.settle_offer().await?;
                    continue;
                }
                Phase::FinalChoice => {
                    if strategy.switch(&self.machine) {
                        Command::SwitchToOther
                    } else {
                        Command::KeepReserved
                    }
                }
            };

            if !self.machine.apply(command) {
                return Err(GameError::Stuck(self.machine.phase().name()));
            }
        }
    }

    async fn settle_offer(&mut self) -> Result<(), GameError> {
        let mut failures = 0;
        while !self.request_offer().await {
            failures += 1;
            let err = self.machine.take_error();
            if failures >= self.attempts {
                return Err(err.unwrap_or(GameError::Stuck(self.machine.phase().name())));
            }
            warn!(attempt = failures, "retrying banker offer");
        }
        Ok(())
    }

    /// Play every open slot in lineup order.
    pub async fn draft_roster<S: Strategy>(
        &mut self,
        strategy: &mut S,
    ) -> Result<Roster, GameError> {
        let open: Vec<Slot> = self.machine.session().roster.open_slots().collect();
        for slot in open {
            self.play_slot(slot, strategy).await?;
        }
        info!(
            filled = self.machine.session().roster.filled_count(),
            "roster complete"
        );
        Ok(self.machine.session().roster.clone())
    }
}
