use crate::core::ids::ShipId;
use crate::core::record::{AdjustedBalance, BankEntry};
use crate::error::{ComplianceResult, NotFoundError, ValidationError};
use crate::ports::{BankStore, ComplianceStore};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// A ship's stored balance next to what it has banked from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub cb_before: f64,
    pub banked: f64,
    pub cb_after: f64,
}

/// Result of applying banked surplus against a deficit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    pub ship_id: ShipId,
    pub year: u16,
    pub applied: f64,
    /// Banked surplus still unapplied afterwards.
    pub remaining: f64,
}

/// Surplus banking and application rules for (ship, year) keys.
///
/// Every operation reads current totals, validates, then writes. The
/// ledger holds no state of its own; serializing concurrent calls for
/// the same key is the store's job (see [`BankStore::create`] and
/// [`BankStore::apply`]).
pub struct BankingLedger<'a> {
    records: &'a dyn ComplianceStore,
    bank: &'a dyn BankStore,
}

fn require_positive(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveAmount { amount })
    }
}

impl<'a> BankingLedger<'a> {
    pub fn new(records: &'a dyn ComplianceStore, bank: &'a dyn BankStore) -> Self {
        Self { records, bank }
    }

    /// Bank `amount` of the ship's surplus for `year`.
    ///
    /// The whole amount is banked or the call fails; there is no partial
    /// banking. The surplus available is the recorded balance less what
    /// has already been banked from it.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveAmount`] for a zero, negative or non-finite amount.
    /// - [`NotFoundError::Record`] if no balance was computed for (ship, year).
    /// - [`ValidationError::NonPositiveCb`] if the balance is not a surplus.
    /// - [`ValidationError::AmountExceedsAvailable`] if `amount` exceeds the surplus.
    pub fn bank_surplus(
        &self,
        ship: &ShipId,
        year: u16,
        amount: f64,
    ) -> ComplianceResult<BankEntry> {
        require_positive(amount)?;

        let record = self
            .records
            .find(ship, year)?
            .ok_or_else(|| NotFoundError::Record {
                ship: ship.clone(),
                year,
            })?;

        if record.cb <= 0.0 {
            warn!("refusing to bank for {} in {}: cb {}", ship, year, record.cb);
            return Err(ValidationError::NonPositiveCb {
                ship: ship.clone(),
                year,
                cb: record.cb,
            }
            .into());
        }

        let already_banked: f64 = self
            .bank
            .entries(ship, year)?
            .iter()
            .map(|e| e.amount)
            .sum();
        let available = record.cb - already_banked;
        if amount > available {
            warn!(
                "refusing to bank {} for {} in {}: only {} available",
                amount, ship, year, available
            );
            return Err(ValidationError::AmountExceedsAvailable {
                requested: amount,
                available,
            }
            .into());
        }

        let entry = self.bank.create(ship, year, amount, record.cb)?;
        info!("banked {} for {} in {}", amount, ship, year);
        Ok(entry)
    }

    /// Apply `amount` of previously banked surplus for (ship, year).
    ///
    /// The applied amount never exceeds what is banked and unapplied, so
    /// the remaining banked balance never goes negative.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveAmount`] for a zero, negative or non-finite amount.
    /// - [`ValidationError::NoBankedSurplus`] if nothing is banked and unapplied.
    /// - [`ValidationError::AmountExceedsBanked`] if `amount` exceeds the unapplied total.
    pub fn apply_banked(
        &self,
        ship: &ShipId,
        year: u16,
        amount: f64,
    ) -> ComplianceResult<ApplyOutcome> {
        require_positive(amount)?;

        let unapplied = self.bank.total_unapplied(ship, year)?;
        if unapplied <= 0.0 {
            warn!("refusing to apply for {} in {}: nothing banked", ship, year);
            return Err(ValidationError::NoBankedSurplus {
                ship: ship.clone(),
                year,
            }
            .into());
        }
        if amount > unapplied {
            warn!(
                "refusing to apply {} for {} in {}: only {} banked",
                amount, ship, year, unapplied
            );
            return Err(ValidationError::AmountExceedsBanked {
                requested: amount,
                available: unapplied,
            }
            .into());
        }

        self.bank.apply(ship, year, amount)?;
        info!("applied {} banked surplus for {} in {}", amount, ship, year);
        Ok(ApplyOutcome {
            ship_id: ship.clone(),
            year,
            applied: amount,
            remaining: unapplied - amount,
        })
    }

    /// Stored balance, total banked from it, and the balance left after banking.
    pub fn compliance_summary(&self, ship: &ShipId, year: u16) -> ComplianceResult<ComplianceSummary> {
        let record = self
            .records
            .find(ship, year)?
            .ok_or_else(|| NotFoundError::Record {
                ship: ship.clone(),
                year,
            })?;
        let banked: f64 = self
            .bank
            .entries(ship, year)?
            .iter()
            .map(|e| e.amount)
            .sum();
        Ok(ComplianceSummary {
            cb_before: record.cb,
            banked,
            cb_after: record.cb - banked,
        })
    }

    /// Balances with applied banked credit added (`cb + applied`). Empty if
    /// no balance was computed for (ship, year).
    pub fn adjusted_balances(&self, ship: &ShipId, year: u16) -> ComplianceResult<Vec<AdjustedBalance>> {
        Ok(self.records.find_adjusted(ship, year)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComplianceError;
    use crate::store::memory::InMemoryStore;

    fn store_with_cb(cb: f64) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.save(&ShipId::new("S001"), 2025, cb, None).unwrap();
        store
    }

    fn validation(err: ComplianceError) -> ValidationError {
        match err {
            ComplianceError::Validation(v) => v,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_bank_within_surplus() {
        let store = store_with_cb(750.5);
        let ledger = BankingLedger::new(&store, &store);
        let ship = ShipId::new("S001");

        let entry = ledger.bank_surplus(&ship, 2025, 500.0).unwrap();
        assert_eq!(entry.amount, 500.0);
        assert_eq!(entry.applied, 0.0);
        assert_eq!(store.total_unapplied(&ship, 2025).unwrap(), 500.0);
    }

    #[test]
    fn test_bank_more_than_surplus() {
        let store = store_with_cb(750.5);
        let ledger = BankingLedger::new(&store, &store);
        let ship = ShipId::new("S001");

        let err = validation(ledger.bank_surplus(&ship, 2025, 800.0).unwrap_err());
        assert_eq!(
            err,
            ValidationError::AmountExceedsAvailable {
                requested: 800.0,
                available: 750.5
            }
        );
        assert!(store.entries(&ship, 2025).unwrap().is_empty());
    }

    #[test]
    fn test_bank_deficit_rejected() {
        let store = store_with_cb(-100.0);
        let ledger = BankingLedger::new(&store, &store);

        let err = validation(
            ledger
                .bank_surplus(&ShipId::new("S001"), 2025, 10.0)
                .unwrap_err(),
        );
        assert!(matches!(err, ValidationError::NonPositiveCb { cb, .. } if cb == -100.0));
    }

    #[test]
    fn test_bank_without_record() {
        let store = InMemoryStore::new();
        let ledger = BankingLedger::new(&store, &store);

        let err = ledger
            .bank_surplus(&ShipId::new("S404"), 2025, 10.0)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_bank_non_positive_amount() {
        let store = store_with_cb(100.0);
        let ledger = BankingLedger::new(&store, &store);
        let ship = ShipId::new("S001");

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = validation(ledger.bank_surplus(&ship, 2025, amount).unwrap_err());
            assert!(matches!(err, ValidationError::NonPositiveAmount { .. }));
        }
    }

    #[test]
    fn test_repeat_banking_cannot_exceed_surplus() {
        let store = store_with_cb(750.5);
        let ledger = BankingLedger::new(&store, &store);
        let ship = ShipId::new("S001");

        ledger.bank_surplus(&ship, 2025, 500.0).unwrap();
        let err = validation(ledger.bank_surplus(&ship, 2025, 500.0).unwrap_err());
        assert_eq!(
            err,
            ValidationError::AmountExceedsAvailable {
                requested: 500.0,
                available: 250.5
            }
        );
        ledger.bank_surplus(&ship, 2025, 250.5).unwrap();
    }

    #[test]
    fn test_apply_without_banked_surplus() {
        let store = store_with_cb(-50.0);
        let ledger = BankingLedger::new(&store, &store);

        let err = validation(
            ledger
                .apply_banked(&ShipId::new("S001"), 2025, 10.0)
                .unwrap_err(),
        );
        assert!(matches!(err, ValidationError::NoBankedSurplus { .. }));
    }

    #[test]
    fn test_apply_partial_then_exhaust() {
        let store = store_with_cb(300.0);
        let ledger = BankingLedger::new(&store, &store);
        let ship = ShipId::new("S001");
        ledger.bank_surplus(&ship, 2025, 200.0).unwrap();

        let first = ledger.apply_banked(&ship, 2025, 150.0).unwrap();
        assert_eq!(first.remaining, 50.0);

        let err = validation(ledger.apply_banked(&ship, 2025, 60.0).unwrap_err());
        assert_eq!(
            err,
            ValidationError::AmountExceedsBanked {
                requested: 60.0,
                available: 50.0
            }
        );

        let last = ledger.apply_banked(&ship, 2025, 50.0).unwrap();
        assert_eq!(last.remaining, 0.0);

        let err = validation(ledger.apply_banked(&ship, 2025, 1.0).unwrap_err());
        assert!(matches!(err, ValidationError::NoBankedSurplus { .. }));
    }

    #[test]
    fn test_summary_and_adjusted() {
        let store = store_with_cb(750.5);
        let ledger = BankingLedger::new(&store, &store);
        let ship = ShipId::new("S001");
        ledger.bank_surplus(&ship, 2025, 500.0).unwrap();
        ledger.apply_banked(&ship, 2025, 200.0).unwrap();

        let summary = ledger.compliance_summary(&ship, 2025).unwrap();
        assert_eq!(summary.cb_before, 750.5);
        assert_eq!(summary.banked, 500.0);
        assert_eq!(summary.cb_after, 250.5);

        let adjusted = ledger.adjusted_balances(&ship, 2025).unwrap();
        assert_eq!(adjusted.len(), 1);
        assert_eq!(adjusted[0].cb_after, 950.5);

        assert!(ledger.adjusted_balances(&ship, 2031).unwrap().is_empty());
        assert!(ledger.compliance_summary(&ship, 2031).unwrap_err().is_not_found());
    }
}
