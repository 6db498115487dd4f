//! The Deal-or-No-Deal game: phases, commands and the state machine.
//!
//! ## Key Types
//!
//! - `GameMachine`: owns a `Session` and the current play-through
//! - `Phase`: where the play-through is, with the data valid there
//! - `Command`: a synchronous player action, applied with `GameMachine::apply`
//! - `BankerOffer` / `OfferRequest`: what the banker returns and is asked
//! - `Roster`: the five slots filled across play-throughs
//!
//! ## Collaborators
//!
//! The machine never awaits. Pool generation and banker offers are split
//! into `begin_load`/`finish_load` and `begin_offer`/`finish_offer`; the
//! driver in `crate::driver` performs the awaits in between.

pub mod command;
pub mod error;
pub mod machine;
pub mod offer;
pub mod phase;
pub mod roster;
pub mod session;

pub use command::{Command, CommandRecord};
pub use error::GameError;
pub use machine::{GameMachine, PoolRequest};
pub use offer::{request_seed, target_tier, BankerOffer, OfferRequest};
pub use phase::{OfferState, Phase, Resolution};
pub use roster::Roster;
pub use session::Session;
