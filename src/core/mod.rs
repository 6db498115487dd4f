//! Core types: prizes, cases, roster slots, RNG, configuration.
//!
//! These are the building blocks shared by the pool model, the game
//! machine and the collaborator services.

pub mod prize;
pub mod case;
pub mod slot;
pub mod rng;
pub mod config;

pub use prize::{Prize, PrizeId};
pub use case::{Case, CaseNumber, Tier};
pub use slot::{ParseSlotError, Slot, SlotMap, SLOT_COUNT};
pub use rng::GameRng;
pub use config::{ConfigError, GameConfig, Schedule, DEFAULT_POOL_SIZE, DEFAULT_SCHEDULE};
