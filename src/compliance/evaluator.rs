use crate::compliance::formula;
use crate::core::balance::ComplianceBalance;
use crate::core::ids::ShipId;
use crate::core::route::{Route, MINIMUM_YEAR};
use crate::error::{ComplianceResult, NotFoundError, ValidationError};
use crate::ports::{ComplianceStore, RouteRepository};
use log::debug;

/// Computes compliance balances from routes and records them.
pub struct ComplianceEvaluator<'a> {
    routes: &'a dyn RouteRepository,
    records: &'a dyn ComplianceStore,
}

impl<'a> ComplianceEvaluator<'a> {
    pub fn new(routes: &'a dyn RouteRepository, records: &'a dyn ComplianceStore) -> Self {
        Self { routes, records }
    }

    /// Balance of `route` against the `year` target, without persisting it.
    pub fn evaluate(route: &Route, ship: &ShipId, year: u16) -> ComplianceBalance {
        ComplianceBalance::new(ship.clone(), year, formula::compliance_balance(route, year))
    }

    /// Resolve `route_code`, compute the ship's balance for `year` and store
    /// it as the (ship, year) compliance record.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::Route`] if no route has that code.
    /// - [`ValidationError::YearTooEarly`] if `year` precedes the regulation.
    pub fn compute_cb(
        &self,
        ship: &ShipId,
        route_code: &str,
        year: u16,
    ) -> ComplianceResult<ComplianceBalance> {
        if year < MINIMUM_YEAR {
            return Err(ValidationError::YearTooEarly { year }.into());
        }

        let route = self
            .routes
            .find_by_code(route_code)?
            .ok_or_else(|| NotFoundError::Route {
                code: route_code.to_string(),
            })?;

        let balance = Self::evaluate(&route, ship, year);
        debug!(
            "cb for {} on {} in {}: target {:.4}, actual {:.4}, cb {:.4}",
            ship,
            route_code,
            year,
            formula::target_intensity(year),
            route.ghg_intensity(),
            balance.value()
        );

        self.records
            .save(ship, year, balance.value(), Some(route.route_code()))?;
        Ok(balance)
    }
}
