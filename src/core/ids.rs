use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vessel whose compliance balance is tracked.
///
/// Ships are the unit of account for compliance records, bank entries
/// and pool membership.
///
/// # Examples
///
/// ```
/// use fueleu_engine::core::ids::ShipId;
///
/// let a = ShipId::new("S001");
/// let b = ShipId::new("S002");
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(String);

impl ShipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShipId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Storage identifier of a route record.
///
/// Distinct from the human-readable route code (e.g. "R001"): the id is
/// what the baseline designation addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
