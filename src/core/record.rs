use crate::core::balance::ComplianceBalance;
use crate::core::ids::ShipId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted snapshot of a computed compliance balance for (ship, year).
///
/// At most one record exists per key; a recomputation replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    pub id: Uuid,
    pub ship_id: ShipId,
    pub year: u16,
    pub cb: f64,
    /// Code of the route the balance was computed from, if any.
    pub route_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ComplianceRecord {
    pub fn new(ship_id: ShipId, year: u16, cb: f64, route_code: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ship_id,
            year,
            cb,
            route_code,
            created_at: Utc::now(),
        }
    }

    pub fn balance(&self) -> ComplianceBalance {
        ComplianceBalance::new(self.ship_id.clone(), self.year, self.cb)
    }
}

/// One banking action: `amount` of surplus set aside for (ship, year),
/// of which `applied` has since been used against a deficit.
///
/// Invariant: `0 <= applied <= amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankEntry {
    pub id: Uuid,
    pub ship_id: ShipId,
    pub year: u16,
    pub amount: f64,
    pub applied: f64,
    pub created_at: DateTime<Utc>,
}

impl BankEntry {
    pub fn new(ship_id: ShipId, year: u16, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            ship_id,
            year,
            amount,
            applied: 0.0,
            created_at: Utc::now(),
        }
    }

    /// Banked amount not yet applied.
    pub fn unapplied(&self) -> f64 {
        self.amount - self.applied
    }
}

/// Compliance balance of a ship with applied banked credit folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedBalance {
    pub ship_id: ShipId,
    pub year: u16,
    pub cb_before: f64,
    pub cb_after: f64,
}
