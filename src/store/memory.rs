use crate::core::ids::{RouteId, ShipId};
use crate::core::pool::{Pool, PoolAllocation};
use crate::core::record::{AdjustedBalance, BankEntry, ComplianceRecord};
use crate::core::route::{Route, RouteFilter};
use crate::error::StoreError;
use crate::ports::{BankStore, ComplianceStore, PoolStore, RouteRepository};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    routes: BTreeMap<RouteId, Route>,
    records: HashMap<(ShipId, u16), ComplianceRecord>,
    /// Kept in creation order; applications consume the oldest entries first.
    bank: Vec<BankEntry>,
    pools: Vec<Pool>,
}

/// Process-local implementation of every persistence port.
///
/// A single mutex guards all tables, so each port call is atomic and
/// bank mutations for the same (ship, year) never interleave.
///
/// # Examples
///
/// ```
/// use fueleu_engine::ports::ComplianceStore;
/// use fueleu_engine::store::memory::InMemoryStore;
/// use fueleu_engine::core::ids::ShipId;
///
/// let store = InMemoryStore::new();
/// store.save(&ShipId::new("S001"), 2025, 750.5, None).unwrap();
/// assert!(store.find(&ShipId::new("S001"), 2025).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let state = State {
            routes: routes.into_iter().map(|r| (r.id().clone(), r)).collect(),
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".into()))
    }

    /// All compliance records of a ship, ordered by year.
    pub fn records_for(&self, ship: &ShipId) -> Result<Vec<ComplianceRecord>, StoreError> {
        let state = self.lock()?;
        let mut records: Vec<_> = state
            .records
            .values()
            .filter(|r| &r.ship_id == ship)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.year);
        Ok(records)
    }

    pub fn pools(&self) -> Result<Vec<Pool>, StoreError> {
        Ok(self.lock()?.pools.clone())
    }
}

fn same_key(entry: &BankEntry, ship: &ShipId, year: u16) -> bool {
    &entry.ship_id == ship && entry.year == year
}

impl RouteRepository for InMemoryStore {
    fn find_by_code(&self, route_code: &str) -> Result<Option<Route>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .routes
            .values()
            .find(|r| r.route_code() == route_code)
            .cloned())
    }

    fn find_baseline(&self) -> Result<Option<Route>, StoreError> {
        let state = self.lock()?;
        Ok(state.routes.values().find(|r| r.is_baseline()).cloned())
    }

    fn set_baseline(&self, id: &RouteId) -> Result<Option<Route>, StoreError> {
        let mut state = self.lock()?;
        if !state.routes.contains_key(id) {
            return Ok(None);
        }
        for route in state.routes.values_mut() {
            let flag = route.id() == id;
            if route.is_baseline() != flag {
                *route = route.with_baseline(flag);
            }
        }
        Ok(state.routes.get(id).cloned())
    }

    fn list(&self, filter: &RouteFilter) -> Result<Vec<Route>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .routes
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    fn upsert(&self, route: Route) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.routes.insert(route.id().clone(), route);
        Ok(())
    }
}

impl ComplianceStore for InMemoryStore {
    fn save(
        &self,
        ship: &ShipId,
        year: u16,
        cb: f64,
        route_code: Option<&str>,
    ) -> Result<ComplianceRecord, StoreError> {
        let record = ComplianceRecord::new(ship.clone(), year, cb, route_code.map(String::from));
        let mut state = self.lock()?;
        state
            .records
            .insert((ship.clone(), year), record.clone());
        Ok(record)
    }

    fn find(&self, ship: &ShipId, year: u16) -> Result<Option<ComplianceRecord>, StoreError> {
        let state = self.lock()?;
        Ok(state.records.get(&(ship.clone(), year)).cloned())
    }

    fn find_adjusted(
        &self,
        ship: &ShipId,
        year: u16,
    ) -> Result<Option<AdjustedBalance>, StoreError> {
        let state = self.lock()?;
        let Some(record) = state.records.get(&(ship.clone(), year)) else {
            return Ok(None);
        };
        let applied: f64 = state
            .bank
            .iter()
            .filter(|e| same_key(e, ship, year))
            .map(|e| e.applied)
            .sum();
        Ok(Some(AdjustedBalance {
            ship_id: ship.clone(),
            year,
            cb_before: record.cb,
            cb_after: record.cb + applied,
        }))
    }
}

impl BankStore for InMemoryStore {
    fn create(
        &self,
        ship: &ShipId,
        year: u16,
        amount: f64,
        limit: f64,
    ) -> Result<BankEntry, StoreError> {
        let mut state = self.lock()?;
        let banked: f64 = state
            .bank
            .iter()
            .filter(|e| same_key(e, ship, year))
            .map(|e| e.amount)
            .sum();
        if banked + amount > limit {
            return Err(StoreError::Conflict(format!(
                "{ship} has banked {banked} of {limit} in {year}, cannot bank {amount}"
            )));
        }

        let entry = BankEntry::new(ship.clone(), year, amount);
        state.bank.push(entry.clone());
        Ok(entry)
    }

    fn entries(&self, ship: &ShipId, year: u16) -> Result<Vec<BankEntry>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .bank
            .iter()
            .filter(|e| same_key(e, ship, year))
            .cloned()
            .collect())
    }

    fn total_unapplied(&self, ship: &ShipId, year: u16) -> Result<f64, StoreError> {
        let state = self.lock()?;
        Ok(state
            .bank
            .iter()
            .filter(|e| same_key(e, ship, year))
            .map(BankEntry::unapplied)
            .sum())
    }

    fn apply(&self, ship: &ShipId, year: u16, amount: f64) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let available: f64 = state
            .bank
            .iter()
            .filter(|e| same_key(e, ship, year))
            .map(BankEntry::unapplied)
            .sum();
        if amount > available {
            return Err(StoreError::Conflict(format!(
                "banked surplus for {ship} in {year} is {available}, cannot apply {amount}"
            )));
        }

        let mut remaining = amount;
        for entry in state.bank.iter_mut().filter(|e| same_key(e, ship, year)) {
            if remaining <= 0.0 {
                break;
            }
            let take = remaining.min(entry.unapplied());
            entry.applied += take;
            remaining -= take;
        }
        Ok(())
    }
}

impl PoolStore for InMemoryStore {
    fn create(&self, year: u16, allocations: &[PoolAllocation]) -> Result<Pool, StoreError> {
        let pool = Pool::new(year, allocations.to_vec());
        self.lock()?.pools.push(pool.clone());
        Ok(pool)
    }
}
