//! Error types for the compliance engine.
//!
//! Business-rule and structural failures are [`ValidationError`]s, missing
//! references are [`NotFoundError`]s. Both are recoverable by the caller
//! supplying different input. [`StoreError`] is the separate channel for
//! persistence failures the engine cannot do anything about.

use crate::core::ids::{RouteId, ShipId};
use thiserror::Error;

/// A structural invariant or business rule was violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("GHG intensity must be positive")]
    NonPositiveIntensity { intensity: f64 },

    #[error("Fuel consumption must be positive")]
    NonPositiveConsumption { consumption: f64 },

    #[error("Year must be 2024 or later")]
    YearTooEarly { year: u16 },

    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: f64 },

    #[error("ship {ship} has no surplus to bank in {year} (cb = {cb})")]
    NonPositiveCb { ship: ShipId, year: u16, cb: f64 },

    #[error("amount {requested} exceeds available surplus {available}")]
    AmountExceedsAvailable { requested: f64, available: f64 },

    #[error("ship {ship} has no banked surplus for {year}")]
    NoBankedSurplus { ship: ShipId, year: u16 },

    #[error("amount {requested} exceeds banked surplus {available}")]
    AmountExceedsBanked { requested: f64, available: f64 },

    #[error("pool must have at least 2 members, got {count}")]
    PoolMinimumMembers { count: usize },

    #[error("pool total compliance balance must be non-negative, got {total}")]
    PoolNegativeTotal { total: f64 },

    #[error("ship {ship} appears more than once in the pool")]
    DuplicatePoolMember { ship: ShipId },

    #[error("deficit ship {ship} would exit the pool worse off ({before} -> {after})")]
    MemberExitsWorse { ship: ShipId, before: f64, after: f64 },

    #[error("surplus ship {ship} would exit the pool negative ({after})")]
    MemberExitsNegative { ship: ShipId, after: f64 },
}

/// A referenced entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("route with code {code} not found")]
    Route { code: String },

    #[error("route {id} not found")]
    RouteId { id: RouteId },

    #[error("no baseline route has been designated")]
    Baseline,

    #[error("no compliance record for ship {ship} in {year}")]
    Record { ship: ShipId, year: u16 },
}

/// Failure inside a persistence port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A conditional write lost against a concurrent mutation of the same key.
    #[error("conflicting update: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Any failure surfaced by an engine operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComplianceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ComplianceResult<T> = Result<T, ComplianceError>;

impl ComplianceError {
    /// HTTP status an enclosing service should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store(StoreError::Conflict(_)) => 409,
            Self::Store(StoreError::Unavailable(_)) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
