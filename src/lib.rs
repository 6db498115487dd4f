//! # deal-draft
//!
//! A Deal-or-No-Deal roster draft. Each of five roster slots is filled by one
//! play-through: pick a case to keep, open the others round by round, and
//! after every round take or refuse the banker's offer. Refuse them all and
//! the last choice is to keep the reserved case or switch to the one left.
//!
//! ## Design Principles
//!
//! 1. **Sans-IO core**: `GameMachine` never awaits. Collaborator calls are
//!    split into `begin_*` (returns the request) and `finish_*` (takes the
//!    result), with in-flight flags so a request is never issued twice.
//!
//! 2. **Phase carries its data**: the round cursor and the banker offer
//!    live inside the `Phase` variants they belong to.
//!
//! 3. **Deterministic**: pools and offers are seeded, and the same seed and
//!    slot always yield the same game.
//!
//! ## Modules
//!
//! - `core`: prizes, cases, tiers, slots, RNG, configuration
//! - `pool`: validated case pools and the opened-case set
//! - `game`: phases, commands, the state machine, the roster
//! - `services`: collaborator traits, HTTP client, in-process catalog
//! - `driver`: async table that runs a machine against a backend

pub mod core;
pub mod driver;
pub mod game;
pub mod pool;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    Case, CaseNumber, GameConfig, GameRng, Prize, PrizeId, Slot, SlotMap, Tier,
};

pub use crate::pool::{CasePool, OpenedCases, PoolError};

pub use crate::game::{
    BankerOffer, Command, GameError, GameMachine, OfferRequest, OfferState, Phase, Resolution,
    Roster, Session,
};

pub use crate::services::{
    ClientConfig, HttpBackend, LocalBackend, OfferGenerator, PlayerSearch, PoolGenerator,
    ServiceError,
};

pub use crate::driver::{Strategy, Table, Threshold};
