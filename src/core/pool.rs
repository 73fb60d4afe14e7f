use crate::core::ids::ShipId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ship's position offered to a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMember {
    pub ship_id: ShipId,
    pub cb_before: f64,
}

impl PoolMember {
    pub fn new(ship_id: impl Into<ShipId>, cb_before: f64) -> Self {
        Self {
            ship_id: ship_id.into(),
            cb_before,
        }
    }
}

/// A ship's compliance balance before and after pooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolAllocation {
    pub ship_id: ShipId,
    pub cb_before: f64,
    pub cb_after: f64,
}

impl PoolAllocation {
    /// Net amount the ship received (positive) or gave away (negative).
    pub fn transfer(&self) -> f64 {
        self.cb_after - self.cb_before
    }
}

/// A year-scoped group of allocations, persisted as a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: Uuid,
    pub year: u16,
    pub members: Vec<PoolAllocation>,
    pub created_at: DateTime<Utc>,
}

impl Pool {
    pub fn new(year: u16, members: Vec<PoolAllocation>) -> Self {
        Self {
            id: Uuid::new_v4(),
            year,
            members,
            created_at: Utc::now(),
        }
    }

    pub fn total_before(&self) -> f64 {
        self.members.iter().map(|m| m.cb_before).sum()
    }

    pub fn total_after(&self) -> f64 {
        self.members.iter().map(|m| m.cb_after).sum()
    }
}
