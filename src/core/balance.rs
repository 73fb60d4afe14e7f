use crate::core::ids::ShipId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed compliance balance of a ship for one reporting year, in tCO2eq.
///
/// Positive is a surplus (the ship did better than the target intensity),
/// negative is a deficit, zero is exactly compliant. Arithmetic returns a
/// new value; a balance is never changed in place.
///
/// # Examples
///
/// ```
/// use fueleu_engine::core::balance::ComplianceBalance;
/// use fueleu_engine::core::ids::ShipId;
///
/// let cb = ComplianceBalance::new(ShipId::new("S001"), 2025, -100.0);
/// let covered = cb.add(100.0);
///
/// assert!(cb.is_deficit());
/// assert!(covered.is_compliant());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceBalance {
    ship_id: ShipId,
    year: u16,
    value: f64,
}

impl ComplianceBalance {
    pub fn new(ship_id: ShipId, year: u16, value: f64) -> Self {
        Self {
            ship_id,
            year,
            value,
        }
    }

    pub fn add(&self, amount: f64) -> Self {
        Self::new(self.ship_id.clone(), self.year, self.value + amount)
    }

    pub fn subtract(&self, amount: f64) -> Self {
        Self::new(self.ship_id.clone(), self.year, self.value - amount)
    }

    pub fn ship_id(&self) -> &ShipId {
        &self.ship_id
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// The signed magnitude in tCO2eq.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_surplus(&self) -> bool {
        self.value > 0.0
    }

    pub fn is_deficit(&self) -> bool {
        self.value < 0.0
    }

    pub fn is_compliant(&self) -> bool {
        self.value >= 0.0
    }
}

impl fmt::Display for ComplianceBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {:.2} tCO2eq", self.ship_id, self.year, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_subtract_return_new_values() {
        let cb = ComplianceBalance::new(ShipId::new("S001"), 2025, 250.0);
        let more = cb.add(50.0);
        let less = cb.subtract(300.0);

        assert_eq!(cb.value(), 250.0);
        assert_eq!(more.value(), 300.0);
        assert_eq!(less.value(), -50.0);
        assert_eq!(less.ship_id(), cb.ship_id());
        assert_eq!(less.year(), 2025);
    }

    #[test]
    fn test_sign_classification() {
        let ship = ShipId::new("S001");
        assert!(ComplianceBalance::new(ship.clone(), 2025, 1.0).is_surplus());
        assert!(ComplianceBalance::new(ship.clone(), 2025, -1.0).is_deficit());

        let flat = ComplianceBalance::new(ship, 2025, 0.0);
        assert!(!flat.is_surplus());
        assert!(!flat.is_deficit());
        assert!(flat.is_compliant());
    }

    #[test]
    fn test_display() {
        let cb = ComplianceBalance::new(ShipId::new("S009"), 2030, 262.6838);
        assert_eq!(cb.to_string(), "S009 2030: 262.68 tCO2eq");
    }
}
