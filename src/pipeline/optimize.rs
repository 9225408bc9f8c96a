use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::constant::AVERAGE_SPEED_KMH;
use crate::config::SolverParams;
use crate::distance::matrix::DistanceMatrix;
use crate::domain::error::RoutingError;
use crate::domain::types::{Location, RouteConstraints};
use crate::policy::ConstraintPolicy;
use crate::solver::ant_colony::AntColonyRouteOptimizer;
use crate::solver::genetic::GeneticRouteOptimizer;

use super::plan::{Improvement, RouteComparison, RoutePlan, RouteSummary};

/// Run the full optimization pipeline for one shipment: distance matrix,
/// constraint derivation, genetic seeding, ant colony refinement, and
/// response assembly. `constraints` overrides the policy-derived budget
/// when supplied; `seed` makes the whole run reproducible.
pub fn optimize_route(
    locations: &[Location],
    start_idx: usize,
    end_idx: usize,
    constraints: Option<RouteConstraints>,
    params: &SolverParams,
    seed: u64,
) -> Result<RoutePlan, RoutingError> {
    validate_input(locations, start_idx, end_idx)?;

    let dm = DistanceMatrix::build(locations);

    let constraints = constraints.unwrap_or_else(|| {
        ConstraintPolicy::default().derive(&locations[start_idx], &locations[end_idx])
    });
    info!(
        start = start_idx,
        end = end_idx,
        max_stops = constraints.max_stops,
        "derived routing constraints"
    );

    let intermediate: Vec<usize> = (0..locations.len())
        .filter(|&idx| idx != start_idx && idx != end_idx)
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut ga = GeneticRouteOptimizer::new(&dm, start_idx, end_idx, constraints, params.ga.clone());
    let ga_route = ga.run(&intermediate, &mut rng);
    let ga_distance = dm.route_distance(&ga_route.stops);
    debug!(distance = ga_distance, stops = ?ga_route.stops, "genetic seed route");

    let mut aco =
        AntColonyRouteOptimizer::new(&dm, start_idx, end_idx, constraints, params.aco.clone());
    let aco_route = aco.run(&ga_route, &mut rng);
    let aco_distance = dm.route_distance(&aco_route.stops);
    debug!(distance = aco_distance, stops = ?aco_route.stops, "refined route");

    // the plan must never be worse than the seed route already in hand
    let (headline_stops, headline_distance) = if aco_distance <= ga_distance {
        (&aco_route.stops, aco_distance)
    } else {
        (&ga_route.stops, ga_distance)
    };

    let RouteSummary {
        route,
        stops,
        total_distance_km,
        polyline,
    } = RouteSummary::new(headline_stops, locations, headline_distance);

    let improvement = Improvement {
        distance_km: ga_distance - aco_distance,
        percentage: if ga_distance > 0.0 {
            (ga_distance - aco_distance) / ga_distance * 100.0
        } else {
            0.0
        },
    };

    info!(
        total_distance_km = headline_distance,
        stops = route.len(),
        "route optimization finished"
    );

    Ok(RoutePlan {
        estimated_time: format_estimated_time(headline_distance),
        route,
        stops,
        total_distance_km,
        polyline,
        comparison: Some(RouteComparison {
            ga: RouteSummary::new(&ga_route.stops, locations, ga_distance),
            aco: RouteSummary::new(&aco_route.stops, locations, aco_distance),
            improvement,
        }),
    })
}

/// Malformed input is the only condition that surfaces as an error;
/// everything downstream degrades gracefully inside the solvers.
fn validate_input(
    locations: &[Location],
    start_idx: usize,
    end_idx: usize,
) -> Result<(), RoutingError> {
    if locations.is_empty() {
        return Err(RoutingError::EmptyLocations);
    }

    for index in [start_idx, end_idx] {
        if index >= locations.len() {
            return Err(RoutingError::IndexOutOfBounds {
                index,
                len: locations.len(),
            });
        }
    }

    if start_idx == end_idx {
        return Err(RoutingError::StartEqualsEnd);
    }

    for location in locations {
        let lat_ok = location.latitude.is_finite() && (-90.0..=90.0).contains(&location.latitude);
        let lon_ok =
            location.longitude.is_finite() && (-180.0..=180.0).contains(&location.longitude);
        if !lat_ok || !lon_ok {
            return Err(RoutingError::InvalidCoordinates {
                id: location.id.clone(),
            });
        }
    }

    Ok(())
}

/// Coarse ETA from a constant 40 km/h average speed: minutes under an
/// hour, hours under a day, days beyond that.
pub fn format_estimated_time(distance_km: f64) -> String {
    let hours = distance_km / AVERAGE_SPEED_KMH;

    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).round() as i64)
    } else if hours < 24.0 {
        format!("{:.1} hours", hours)
    } else {
        format!("{:.1} days", hours / 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimated_time_tiers() {
        assert_eq!(format_estimated_time(10.0), "15 minutes");
        assert_eq!(format_estimated_time(100.0), "2.5 hours");
        assert_eq!(format_estimated_time(2000.0), "2.1 days");
    }

    #[test]
    fn validation_rejects_bad_input() {
        let locations = vec![
            Location {
                id: "a".to_string(),
                name: "a".to_string(),
                address: String::new(),
                district: "d".to_string(),
                province: "p".to_string(),
                latitude: 10.0,
                longitude: 106.0,
            },
            Location {
                id: "b".to_string(),
                name: "b".to_string(),
                address: String::new(),
                district: "d".to_string(),
                province: "p".to_string(),
                latitude: 10.1,
                longitude: 106.1,
            },
        ];

        assert_eq!(
            validate_input(&[], 0, 1),
            Err(RoutingError::EmptyLocations)
        );
        assert_eq!(
            validate_input(&locations, 0, 0),
            Err(RoutingError::StartEqualsEnd)
        );
        assert_eq!(
            validate_input(&locations, 0, 5),
            Err(RoutingError::IndexOutOfBounds { index: 5, len: 2 })
        );

        let mut broken = locations.clone();
        broken[1].latitude = f64::NAN;
        assert_eq!(
            validate_input(&broken, 0, 1),
            Err(RoutingError::InvalidCoordinates {
                id: "b".to_string()
            })
        );

        assert!(validate_input(&locations, 0, 1).is_ok());
    }
}
