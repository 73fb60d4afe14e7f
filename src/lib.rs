//! # fueleu-engine
//!
//! Compliance balance computation, surplus banking and pooling for
//! maritime GHG-intensity regulation.
//!
//! Given routes with measured GHG intensity and fuel burn, the engine
//! computes each ship's signed compliance balance against the year's
//! target, lets surplus be banked and later applied, and redistributes
//! surplus across a pool of ships without leaving any of them worse off.
//!
//! ## Architecture
//!
//! - **core** — Domain values: ships, routes, balances, records, pools
//! - **compliance** — The balance formula, its evaluator and route comparison
//! - **banking** — Banking and application of surplus per (ship, year)
//! - **pooling** — Greedy pool allocation and pool creation
//! - **ports** — Persistence contracts the engine calls through
//! - **store** — In-memory implementation of every port
//! - **simulation** — Random fleet generation for stress testing

pub mod banking;
pub mod compliance;
pub mod core;
pub mod error;
pub mod pooling;
pub mod ports;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::banking::ledger::BankingLedger;
    pub use crate::compliance::comparison::RouteService;
    pub use crate::compliance::evaluator::ComplianceEvaluator;
    pub use crate::core::balance::ComplianceBalance;
    pub use crate::core::ids::{RouteId, ShipId};
    pub use crate::core::pool::{PoolAllocation, PoolMember};
    pub use crate::core::route::{validate, FuelType, Route, RouteCandidate, RouteFilter, VesselType};
    pub use crate::error::{ComplianceError, ComplianceResult, NotFoundError, ValidationError};
    pub use crate::pooling::allocator::PoolAllocator;
    pub use crate::pooling::service::{PoolRequest, PoolingService};
    pub use crate::ports::{BankStore, ComplianceStore, PoolStore, RouteRepository};
    pub use crate::store::memory::InMemoryStore;
}
