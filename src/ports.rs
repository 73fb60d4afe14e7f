//! Data-access contracts the engine calls through.
//!
//! The engine is stateless: everything it reads or writes goes through
//! these traits. Implementations own the data and are responsible for
//! serializing mutations of the same (ship, year) key and for making
//! pool creation all-or-nothing. See [`crate::store::memory`] for the
//! in-process implementation.

use crate::core::ids::{RouteId, ShipId};
use crate::core::pool::{Pool, PoolAllocation};
use crate::core::record::{AdjustedBalance, BankEntry, ComplianceRecord};
use crate::core::route::{Route, RouteFilter};
use crate::error::StoreError;

pub trait RouteRepository: Send + Sync {
    fn find_by_code(&self, route_code: &str) -> Result<Option<Route>, StoreError>;

    fn find_baseline(&self) -> Result<Option<Route>, StoreError>;

    /// Designate `id` as the baseline, clearing the flag on every other route.
    /// Returns the updated route, or `None` if no route has that id.
    fn set_baseline(&self, id: &RouteId) -> Result<Option<Route>, StoreError>;

    fn list(&self, filter: &RouteFilter) -> Result<Vec<Route>, StoreError>;

    fn upsert(&self, route: Route) -> Result<(), StoreError>;
}

pub trait ComplianceStore: Send + Sync {
    /// Insert or replace the record for (ship, year).
    fn save(
        &self,
        ship: &ShipId,
        year: u16,
        cb: f64,
        route_code: Option<&str>,
    ) -> Result<ComplianceRecord, StoreError>;

    fn find(&self, ship: &ShipId, year: u16) -> Result<Option<ComplianceRecord>, StoreError>;

    /// The stored balance with applied banked credit added back.
    fn find_adjusted(&self, ship: &ShipId, year: u16)
        -> Result<Option<AdjustedBalance>, StoreError>;
}

pub trait BankStore: Send + Sync {
    /// Bank `amount` for (ship, year).
    ///
    /// Must be a conditional write: if the total banked for the key would
    /// exceed `limit` (the recorded surplus), fail with [`StoreError::Conflict`].
    fn create(
        &self,
        ship: &ShipId,
        year: u16,
        amount: f64,
        limit: f64,
    ) -> Result<BankEntry, StoreError>;

    fn entries(&self, ship: &ShipId, year: u16) -> Result<Vec<BankEntry>, StoreError>;

    fn total_unapplied(&self, ship: &ShipId, year: u16) -> Result<f64, StoreError>;

    /// Mark `amount` of the banked total as applied.
    ///
    /// Must be a conditional write: if the unapplied total has fallen below
    /// `amount` since the caller read it, fail with [`StoreError::Conflict`].
    fn apply(&self, ship: &ShipId, year: u16, amount: f64) -> Result<(), StoreError>;
}

pub trait PoolStore: Send + Sync {
    /// Persist all allocations of a pool atomically.
    fn create(&self, year: u16, allocations: &[PoolAllocation]) -> Result<Pool, StoreError>;
}
