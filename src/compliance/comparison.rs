use crate::compliance::formula::{self, COMPARISON_TARGET_YEAR};
use crate::core::ids::RouteId;
use crate::core::route::{FuelType, Route, RouteFilter, VesselType};
use crate::error::{ComplianceResult, NotFoundError};
use crate::ports::RouteRepository;
use log::info;
use serde::{Deserialize, Serialize};

/// A route as listed to clients, with its computed total emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub route_id: RouteId,
    pub route_code: String,
    pub vessel_type: VesselType,
    pub fuel_type: FuelType,
    pub year: u16,
    pub ghg_intensity: f64,
    pub fuel_consumption: f64,
    pub distance: f64,
    pub total_emissions: f64,
    pub is_baseline: bool,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            route_id: route.id().clone(),
            route_code: route.route_code().to_string(),
            vessel_type: route.vessel_type(),
            fuel_type: route.fuel_type(),
            year: route.year(),
            ghg_intensity: route.ghg_intensity(),
            fuel_consumption: route.fuel_consumption(),
            distance: route.distance(),
            total_emissions: formula::total_emissions(route),
            is_baseline: route.is_baseline(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineUpdate {
    pub success: bool,
    pub route_id: RouteId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityPoint {
    pub route_id: RouteId,
    pub ghg_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub route_id: RouteId,
    pub ghg_intensity: f64,
    /// `(intensity / baseline - 1) * 100`.
    pub percent_diff: f64,
    /// Intensity at or below the target.
    pub compliant: bool,
}

/// Every non-baseline route measured against the baseline and the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComparison {
    pub baseline: IntensityPoint,
    pub comparisons: Vec<ComparisonEntry>,
    pub target: f64,
}

impl RouteComparison {
    /// Compare `routes` against `baseline`. The baseline itself is skipped.
    pub fn build(baseline: &Route, routes: &[Route], target: f64) -> Self {
        let comparisons = routes
            .iter()
            .filter(|r| r.id() != baseline.id())
            .map(|r| ComparisonEntry {
                route_id: r.id().clone(),
                ghg_intensity: r.ghg_intensity(),
                percent_diff: formula::percent_diff(r.ghg_intensity(), baseline.ghg_intensity()),
                compliant: r.ghg_intensity() <= target,
            })
            .collect();

        Self {
            baseline: IntensityPoint {
                route_id: baseline.id().clone(),
                ghg_intensity: baseline.ghg_intensity(),
            },
            comparisons,
            target,
        }
    }

    pub fn compliant_count(&self) -> usize {
        self.comparisons.iter().filter(|c| c.compliant).count()
    }
}

/// Route listing, baseline designation and baseline comparison.
pub struct RouteService<'a> {
    routes: &'a dyn RouteRepository,
}

impl<'a> RouteService<'a> {
    pub fn new(routes: &'a dyn RouteRepository) -> Self {
        Self { routes }
    }

    pub fn list_routes(&self, filter: &RouteFilter) -> ComplianceResult<Vec<RouteSummary>> {
        let routes = self.routes.list(filter)?;
        Ok(routes.iter().map(RouteSummary::from).collect())
    }

    pub fn set_baseline(&self, id: &RouteId) -> ComplianceResult<BaselineUpdate> {
        let route = self
            .routes
            .set_baseline(id)?
            .ok_or_else(|| NotFoundError::RouteId { id: id.clone() })?;
        info!("route {} ({}) is now the baseline", route.id(), route.route_code());
        Ok(BaselineUpdate {
            success: true,
            route_id: route.id().clone(),
        })
    }

    pub fn compare_routes(&self) -> ComplianceResult<RouteComparison> {
        let baseline = self
            .routes
            .find_baseline()?
            .ok_or(NotFoundError::Baseline)?;
        let routes = self.routes.list(&RouteFilter::default())?;
        Ok(RouteComparison::build(
            &baseline,
            &routes,
            formula::target_intensity(COMPARISON_TARGET_YEAR),
        ))
    }
}
