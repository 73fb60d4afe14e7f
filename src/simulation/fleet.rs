//! Random fleet generation for stress testing and benchmarks.
//!
//! Produces validated routes and pool positions with realistic ranges of
//! intensity and fuel burn.

use crate::compliance::formula;
use crate::core::ids::{RouteId, ShipId};
use crate::core::pool::PoolMember;
use crate::core::route::{validate, FuelType, Route, RouteCandidate, VesselType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for generating a random fleet.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Number of ships (one route each).
    pub ship_count: usize,
    /// Reporting year of the generated routes.
    pub year: u16,
    /// GHG intensity range, gCO2e/MJ, inclusive.
    pub min_intensity: f64,
    pub max_intensity: f64,
    /// Fuel consumption range, tonnes, inclusive.
    pub min_consumption: f64,
    pub max_consumption: f64,
    /// Fixed seed for reproducible fleets; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            ship_count: 10,
            year: 2025,
            min_intensity: 80.0,
            max_intensity: 95.0,
            min_consumption: 500.0,
            max_consumption: 10_000.0,
            seed: None,
        }
    }
}

fn rng_for(config: &FleetConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate one validated route per ship, coded `R001`, `R002`, ...
pub fn generate_routes(config: &FleetConfig) -> Vec<Route> {
    let mut rng = rng_for(config);

    (0..config.ship_count)
        .filter_map(|i| {
            let vessel_type = VesselType::ALL[rng.gen_range(0..VesselType::ALL.len())];
            let fuel_type = FuelType::ALL[rng.gen_range(0..FuelType::ALL.len())];
            let candidate = RouteCandidate {
                id: RouteId::new(format!("{}", i + 1)),
                route_code: format!("R{:03}", i + 1),
                vessel_type,
                fuel_type,
                year: config.year,
                ghg_intensity: rng.gen_range(config.min_intensity..=config.max_intensity),
                fuel_consumption: rng.gen_range(config.min_consumption..=config.max_consumption),
                distance: rng.gen_range(1_000.0..20_000.0),
                is_baseline: i == 0,
            };
            validate(candidate).ok()
        })
        .collect()
}

/// Generate pool positions for a random fleet.
///
/// Balances come from the compliance formula applied to generated routes.
/// If the fleet is net short, the largest position is topped up so that
/// the pool is admissible.
pub fn generate_pool_members(config: &FleetConfig) -> Vec<PoolMember> {
    let mut members: Vec<PoolMember> = generate_routes(config)
        .iter()
        .enumerate()
        .map(|(i, route)| {
            PoolMember::new(
                ShipId::new(format!("S{:03}", i + 1)),
                formula::compliance_balance(route, config.year),
            )
        })
        .collect();

    let total: f64 = members.iter().map(|m| m.cb_before).sum();
    if total < 0.0 {
        if let Some(top) = members
            .iter_mut()
            .max_by(|a, b| a.cb_before.total_cmp(&b.cb_before))
        {
            top.cb_before += -total + 1.0;
        }
    }
    members
}
