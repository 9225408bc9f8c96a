use serde::Serialize;

use crate::domain::types::Location;

/// Caller-facing view of one stop on a route. Coordinates are
/// `[longitude, latitude]`, GeoJSON ordering.
#[derive(Debug, Clone, Serialize)]
pub struct RouteStop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: [f64; 2],
}

/// One route with its stop views, polyline, and total distance.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub route: Vec<usize>,
    pub stops: Vec<RouteStop>,
    pub total_distance_km: f64,
    pub polyline: Vec<[f64; 2]>,
}

impl RouteSummary {
    pub fn new(route: &[usize], locations: &[Location], total_distance_km: f64) -> Self {
        let stops = route
            .iter()
            .map(|&idx| {
                let location = &locations[idx];
                RouteStop {
                    id: location.id.clone(),
                    name: location.name.clone(),
                    address: location.address.clone(),
                    coordinates: [location.longitude, location.latitude],
                }
            })
            .collect();

        let polyline = route
            .iter()
            .map(|&idx| [locations[idx].longitude, locations[idx].latitude])
            .collect();

        RouteSummary {
            route: route.to_vec(),
            stops,
            total_distance_km,
            polyline,
        }
    }
}

/// Distance saved by the refinement stage over the genetic seed, absolute
/// and relative. May be negative: the refinement is independently
/// stochastic and is not guaranteed to beat its seed.
#[derive(Debug, Clone, Serialize)]
pub struct Improvement {
    pub distance_km: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteComparison {
    pub ga: RouteSummary,
    pub aco: RouteSummary,
    pub improvement: Improvement,
}

/// The assembled optimization result handed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub route: Vec<usize>,
    pub stops: Vec<RouteStop>,
    pub total_distance_km: f64,
    pub estimated_time: String,
    pub polyline: Vec<[f64; 2]>,
    pub comparison: Option<RouteComparison>,
}
