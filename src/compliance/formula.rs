//! The regulatory compliance-balance formula.
//!
//! All arithmetic is plain `f64` with no intermediate rounding. Display
//! rounding is left to whoever prints the numbers.

use crate::core::route::{FuelType, Route};

/// Fixed energy content of marine fuel, MJ per tonne.
pub const ENERGY_PER_TONNE_MJ: f64 = 41_000.0;

/// Reference GHG intensity the reduction targets are applied to, gCO2e/MJ.
pub const BASELINE_INTENSITY: f64 = 91.16;

/// Reduction applied to years absent from the reduction table.
pub const DEFAULT_REDUCTION_PERCENT: f64 = 2.0;

/// Converts gram-scale products into tonnes.
pub const GRAMS_PER_TONNE: f64 = 1_000_000.0;

/// Year whose target is used when comparing routes against the baseline.
pub const COMPARISON_TARGET_YEAR: u16 = 2025;

/// Required intensity reduction for `year`, in percent of the baseline.
pub fn reduction_percent(year: u16) -> f64 {
    match year {
        2025 => 2.0,
        2030 => 6.0,
        2035 => 14.5,
        2040 => 31.0,
        2045 => 62.0,
        2050 => 80.0,
        _ => DEFAULT_REDUCTION_PERCENT,
    }
}

/// Target GHG intensity for `year`, in gCO2e/MJ.
///
/// # Examples
///
/// ```
/// use fueleu_engine::compliance::formula::target_intensity;
///
/// assert!((target_intensity(2025) - 89.3368).abs() < 1e-9);
/// ```
pub fn target_intensity(year: u16) -> f64 {
    BASELINE_INTENSITY * (1.0 - reduction_percent(year) / 100.0)
}

/// Energy content of the fuel burned, in MJ.
pub fn energy_in_scope(fuel_consumption: f64) -> f64 {
    fuel_consumption * ENERGY_PER_TONNE_MJ
}

/// Tonnes of CO2 emitted per tonne of fuel.
pub fn emission_factor(fuel: FuelType) -> f64 {
    match fuel {
        FuelType::Hfo => 3.114,
        FuelType::Lng => 2.750,
        FuelType::Mgo => 3.206,
    }
}

/// Total CO2 emitted on a route, in tonnes. Informational; does not feed
/// the compliance balance.
pub fn total_emissions(route: &Route) -> f64 {
    route.fuel_consumption() * emission_factor(route.fuel_type())
}

/// Signed compliance balance of `route` measured against the `year` target,
/// in tCO2eq.
pub fn compliance_balance(route: &Route, year: u16) -> f64 {
    let energy = energy_in_scope(route.fuel_consumption());
    (target_intensity(year) - route.ghg_intensity()) * energy / GRAMS_PER_TONNE
}

/// Relative difference of `intensity` against `baseline`, in percent.
pub fn percent_diff(intensity: f64, baseline: f64) -> f64 {
    (intensity / baseline - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::route::{validate, RouteCandidate, VesselType};
    use approx::assert_abs_diff_eq;

    fn route(fuel_type: FuelType, intensity: f64, consumption: f64) -> Route {
        validate(RouteCandidate {
            id: "1".into(),
            route_code: "R001".into(),
            vessel_type: VesselType::Container,
            fuel_type,
            year: 2025,
            ghg_intensity: intensity,
            fuel_consumption: consumption,
            distance: 12_000.0,
            is_baseline: false,
        })
        .unwrap()
    }

    #[test]
    fn test_target_table() {
        let expected = [
            (2025, 89.3368),
            (2030, 85.6904),
            (2035, 77.9418),
            (2040, 62.9004),
            (2045, 34.6408),
            (2050, 18.2320),
        ];
        for (year, target) in expected {
            assert_abs_diff_eq!(target_intensity(year), target, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unlisted_years_use_default_reduction() {
        for year in [2024, 2026, 2031, 2049, 2051] {
            assert_abs_diff_eq!(target_intensity(year), 89.3368, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_energy_in_scope() {
        assert_eq!(energy_in_scope(4800.0), 196_800_000.0);
        assert_eq!(energy_in_scope(1.0), ENERGY_PER_TONNE_MJ);
    }

    #[test]
    fn test_emission_factors() {
        assert_abs_diff_eq!(total_emissions(&route(FuelType::Hfo, 90.0, 1000.0)), 3114.0, epsilon = 1e-9);
        assert_abs_diff_eq!(total_emissions(&route(FuelType::Lng, 90.0, 1000.0)), 2750.0, epsilon = 1e-9);
        assert_abs_diff_eq!(total_emissions(&route(FuelType::Mgo, 90.0, 1000.0)), 3206.0, epsilon = 1e-9);
    }

    #[test]
    fn test_surplus_route() {
        // (89.3368 - 88) * 196 800 000 / 1 000 000
        let cb = compliance_balance(&route(FuelType::Hfo, 88.0, 4800.0), 2025);
        assert_abs_diff_eq!(cb, 1.3368 * 196.8, epsilon = 1e-6);
        assert!(cb > 263.0 && cb < 263.1);
    }

    #[test]
    fn test_deficit_route() {
        let cb = compliance_balance(&route(FuelType::Lng, 93.5, 5000.0), 2025);
        assert_abs_diff_eq!(cb, (89.3368 - 93.5) * 205.0, epsilon = 1e-6);
        assert!(cb < 0.0);
    }

    #[test]
    fn test_on_target_route_is_zero() {
        let cb = compliance_balance(&route(FuelType::Mgo, target_intensity(2030), 1234.0), 2030);
        assert_eq!(cb, 0.0);
    }

    #[test]
    fn test_percent_diff() {
        assert_abs_diff_eq!(percent_diff(88.0, 91.0), (88.0 / 91.0 - 1.0) * 100.0, epsilon = 1e-12);
        assert_eq!(percent_diff(91.0, 91.0), 0.0);
    }
}
