use crate::core::ids::RouteId;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest reporting year a route may carry.
pub const MINIMUM_YEAR: u16 = 2024;

/// Closed set of vessel classes covered by the regulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VesselType {
    Container,
    BulkCarrier,
    Tanker,
    RoRo,
}

impl VesselType {
    pub const ALL: [VesselType; 4] = [
        VesselType::Container,
        VesselType::BulkCarrier,
        VesselType::Tanker,
        VesselType::RoRo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VesselType::Container => "Container",
            VesselType::BulkCarrier => "BulkCarrier",
            VesselType::Tanker => "Tanker",
            VesselType::RoRo => "RoRo",
        }
    }
}

impl fmt::Display for VesselType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VesselType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VesselType::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown vessel type: {s}"))
    }
}

/// Closed set of fuel classes. Every formula table matches on this
/// exhaustively, so a new fuel cannot be added without a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelType {
    #[serde(rename = "HFO")]
    Hfo,
    #[serde(rename = "LNG")]
    Lng,
    #[serde(rename = "MGO")]
    Mgo,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Hfo, FuelType::Lng, FuelType::Mgo];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Hfo => "HFO",
            FuelType::Lng => "LNG",
            FuelType::Mgo => "MGO",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown fuel type: {s}"))
    }
}

/// Unvalidated route data as received from a caller or input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCandidate {
    pub id: RouteId,
    pub route_code: String,
    pub vessel_type: VesselType,
    pub fuel_type: FuelType,
    pub year: u16,
    pub ghg_intensity: f64,
    pub fuel_consumption: f64,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub is_baseline: bool,
}

/// A voyage route whose measured intensity feeds the compliance formula.
///
/// Routes only exist in validated form: the sole way to obtain one is
/// [`validate`] (or deserialization, which goes through it). They are
/// never mutated; [`Route::with_baseline`] returns a new value.
///
/// # Examples
///
/// ```
/// use fueleu_engine::core::route::{validate, FuelType, RouteCandidate, VesselType};
///
/// let route = validate(RouteCandidate {
///     id: "1".into(),
///     route_code: "R001".into(),
///     vessel_type: VesselType::Container,
///     fuel_type: FuelType::Hfo,
///     year: 2025,
///     ghg_intensity: 88.0,
///     fuel_consumption: 4800.0,
///     distance: 12_000.0,
///     is_baseline: false,
/// })
/// .unwrap();
///
/// assert_eq!(route.route_code(), "R001");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RouteCandidate", into = "RouteCandidate")]
pub struct Route {
    id: RouteId,
    route_code: String,
    vessel_type: VesselType,
    fuel_type: FuelType,
    year: u16,
    ghg_intensity: f64,
    fuel_consumption: f64,
    distance: f64,
    is_baseline: bool,
}

/// Validate a candidate and build a [`Route`].
///
/// Checks run in a fixed order and the first failure is returned:
/// intensity, then consumption, then year.
pub fn validate(candidate: RouteCandidate) -> Result<Route, ValidationError> {
    // Infinite and NaN values fail the positivity checks.
    if !(candidate.ghg_intensity.is_finite() && candidate.ghg_intensity > 0.0) {
        return Err(ValidationError::NonPositiveIntensity {
            intensity: candidate.ghg_intensity,
        });
    }
    if !(candidate.fuel_consumption.is_finite() && candidate.fuel_consumption > 0.0) {
        return Err(ValidationError::NonPositiveConsumption {
            consumption: candidate.fuel_consumption,
        });
    }
    if candidate.year < MINIMUM_YEAR {
        return Err(ValidationError::YearTooEarly {
            year: candidate.year,
        });
    }

    Ok(Route {
        id: candidate.id,
        route_code: candidate.route_code,
        vessel_type: candidate.vessel_type,
        fuel_type: candidate.fuel_type,
        year: candidate.year,
        ghg_intensity: candidate.ghg_intensity,
        fuel_consumption: candidate.fuel_consumption,
        distance: candidate.distance,
        is_baseline: candidate.is_baseline,
    })
}

impl TryFrom<RouteCandidate> for Route {
    type Error = ValidationError;

    fn try_from(candidate: RouteCandidate) -> Result<Self, Self::Error> {
        validate(candidate)
    }
}

impl From<Route> for RouteCandidate {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            route_code: route.route_code,
            vessel_type: route.vessel_type,
            fuel_type: route.fuel_type,
            year: route.year,
            ghg_intensity: route.ghg_intensity,
            fuel_consumption: route.fuel_consumption,
            distance: route.distance,
            is_baseline: route.is_baseline,
        }
    }
}

impl Route {
    /// Copy of this route with the baseline flag replaced.
    pub fn with_baseline(&self, is_baseline: bool) -> Self {
        Self {
            is_baseline,
            ..self.clone()
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn route_code(&self) -> &str {
        &self.route_code
    }

    pub fn vessel_type(&self) -> VesselType {
        self.vessel_type
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Measured GHG intensity in gCO2e/MJ.
    pub fn ghg_intensity(&self) -> f64 {
        self.ghg_intensity
    }

    /// Fuel consumed in tonnes.
    pub fn fuel_consumption(&self) -> f64 {
        self.fuel_consumption
    }

    /// Distance sailed in nautical miles. Informational only.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_baseline(&self) -> bool {
        self.is_baseline
    }
}

/// Optional filters applied when listing routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteFilter {
    pub vessel_type: Option<VesselType>,
    pub fuel_type: Option<FuelType>,
    pub year: Option<u16>,
}

impl RouteFilter {
    pub fn matches(&self, route: &Route) -> bool {
        self.vessel_type.map_or(true, |v| v == route.vessel_type())
            && self.fuel_type.map_or(true, |f| f == route.fuel_type())
            && self.year.map_or(true, |y| y == route.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> RouteCandidate {
        RouteCandidate {
            id: RouteId::new("1"),
            route_code: "R001".into(),
            vessel_type: VesselType::Container,
            fuel_type: FuelType::Hfo,
            year: 2025,
            ghg_intensity: 88.0,
            fuel_consumption: 4800.0,
            distance: 12_000.0,
            is_baseline: false,
        }
    }

    #[test]
    fn test_valid_route() {
        let route = validate(candidate()).unwrap();
        assert_eq!(route.route_code(), "R001");
        assert_eq!(route.fuel_type(), FuelType::Hfo);
        assert_eq!(route.ghg_intensity(), 88.0);
        assert!(!route.is_baseline());
    }

    #[test]
    fn test_zero_intensity_rejected() {
        let err = validate(RouteCandidate {
            ghg_intensity: 0.0,
            ..candidate()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveIntensity { intensity: 0.0 });
    }

    #[test]
    fn test_nan_intensity_rejected() {
        let err = validate(RouteCandidate {
            ghg_intensity: f64::NAN,
            ..candidate()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveIntensity { .. }));
    }

    #[test]
    fn test_infinite_values_rejected() {
        let err = validate(RouteCandidate {
            ghg_intensity: f64::INFINITY,
            ..candidate()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveIntensity { .. }));

        let err = validate(RouteCandidate {
            fuel_consumption: f64::INFINITY,
            ..candidate()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveConsumption { .. }));
    }

    #[test]
    fn test_negative_consumption_rejected() {
        let err = validate(RouteCandidate {
            fuel_consumption: -5.0,
            ..candidate()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Fuel consumption must be positive");
    }

    #[test]
    fn test_year_2023_rejected() {
        let err = validate(RouteCandidate {
            year: 2023,
            ..candidate()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::YearTooEarly { year: 2023 });
    }

    #[test]
    fn test_first_failing_check_wins() {
        let err = validate(RouteCandidate {
            ghg_intensity: -1.0,
            fuel_consumption: 0.0,
            year: 2000,
            ..candidate()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveIntensity { .. }));
    }

    #[test]
    fn test_with_baseline_leaves_original_untouched() {
        let route = validate(candidate()).unwrap();
        let baseline = route.with_baseline(true);
        assert!(baseline.is_baseline());
        assert!(!route.is_baseline());
        assert_eq!(baseline.route_code(), route.route_code());
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let json = r#"{
            "id": "7", "routeCode": "R007", "vesselType": "Tanker",
            "fuelType": "LNG", "year": 2024, "ghgIntensity": 0,
            "fuelConsumption": 100
        }"#;
        let err = serde_json::from_str::<Route>(json).unwrap_err();
        assert!(err.to_string().contains("GHG intensity must be positive"));

        let ok = json.replace("\"ghgIntensity\": 0", "\"ghgIntensity\": 75.5");
        let route: Route = serde_json::from_str(&ok).unwrap();
        assert_eq!(route.fuel_type(), FuelType::Lng);
        assert_eq!(route.distance(), 0.0);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("ro_ro".parse::<VesselType>().ok(), None);
        assert_eq!("roro".parse::<VesselType>().ok(), Some(VesselType::RoRo));
        assert_eq!("mgo".parse::<FuelType>().ok(), Some(FuelType::Mgo));
    }

    #[test]
    fn test_filter() {
        let route = validate(candidate()).unwrap();
        assert!(RouteFilter::default().matches(&route));
        assert!(RouteFilter {
            fuel_type: Some(FuelType::Hfo),
            year: Some(2025),
            ..Default::default()
        }
        .matches(&route));
        assert!(!RouteFilter {
            vessel_type: Some(VesselType::Tanker),
            ..Default::default()
        }
        .matches(&route));
    }
}
