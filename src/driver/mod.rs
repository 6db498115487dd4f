//! Async glue between the game machine and its collaborators.
//!
//! ## Usage
//!
//! ```rust
//! use deal_draft::driver::{Table, Threshold};
//! use deal_draft::game::{GameMachine, Session};
//! use deal_draft::services::{demo_catalog, LocalBackend};
//!
//! # async fn example() -> Result<(), deal_draft::game::GameError> {
//! let machine = GameMachine::new(Session::default()).expect("default config is valid");
//! let mut table = Table::new(machine, LocalBackend::new(demo_catalog()));
//!
//! let roster = table.draft_roster(&mut Threshold::default()).await?;
//! assert!(roster.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod strategy;
pub mod table;

pub use strategy::{RandomPlayer, Strategy, Threshold};
pub use table::{Table, DEFAULT_ATTEMPTS};
