//! External collaborators: pool generation, banker offers, player search.
//!
//! The game machine never calls these itself. The driver awaits them between
//! the machine's `begin_*` and `finish_*` steps.
//!
//! Two backends implement every trait:
//! - `HttpBackend` talks to the game backend over JSON/HTTP
//! - `LocalBackend` runs the same pool algorithm in-process over a `Catalog`

pub mod catalog;
pub mod error;
pub mod http;
pub mod wire;

pub use catalog::{demo_catalog, Candidate, Catalog, LocalBackend, StatLine};
pub use error::{Result, ServiceError};
pub use http::{ClientConfig, HttpBackend};
pub use wire::{CaseDto, CasesResponse, HealthResponse, OfferResponse, PlayerDto, SearchResponse};

use crate::core::{Prize, Slot};
use crate::game::{BankerOffer, OfferRequest};
use crate::pool::CasePool;

/// Builds a case pool for a slot.
#[async_trait::async_trait]
pub trait PoolGenerator: Send + Sync {
    async fn generate(&self, seed: u64, slot: Slot) -> Result<CasePool>;
}

/// Produces the banker's offer for a round.
#[async_trait::async_trait]
pub trait OfferGenerator: Send + Sync {
    async fn offer(&self, request: &OfferRequest) -> Result<BankerOffer>;
}

/// Looks players up by name.
#[async_trait::async_trait]
pub trait PlayerSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Prize>>;
}
