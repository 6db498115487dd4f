//! Case pool model.
//!
//! ## Key Types
//!
//! - `CasePool`: a validated, immutable set of ranked cases for one slot
//! - `OpenedCases`: the insert-only set of opened case numbers
//! - `PoolError`: why a fetched pool was rejected

pub mod case_pool;
pub mod opened;

pub use case_pool::{CasePool, PoolError};
pub use opened::OpenedCases;
