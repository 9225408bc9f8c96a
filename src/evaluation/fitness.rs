use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::RouteConstraints;

/// Weight of the stop-budget under-use penalty.
const UNDERUSE_PENALTY_WEIGHT: f64 = 10.0;

/// Penalized fitness of a candidate route (lower is better). Constraint
/// breaks are not errors: a route with the wrong endpoints or over the
/// stop budget simply scores infinitely bad and selection weeds it out.
pub fn find_fitness(
    stops: &[usize],
    start: usize,
    end: usize,
    constraints: &RouteConstraints,
    dm: &DistanceMatrix,
) -> f64 {
    if !satisfies_shape(stops, start, end, constraints) {
        return f64::INFINITY;
    }

    dm.route_distance(stops) + underuse_penalty(stops, constraints)
}

/// Endpoint and length invariant shared by both optimizers: fixed pickup
/// first, fixed delivery last, at most `max_stops` stops.
pub fn satisfies_shape(
    stops: &[usize],
    start: usize,
    end: usize,
    constraints: &RouteConstraints,
) -> bool {
    stops.len() >= 2
        && stops.len() <= constraints.max_stops
        && stops.first() == Some(&start)
        && stops.last() == Some(&end)
}

/// Rewards routes using more of the allowed stop budget. Without this,
/// the search collapses to degenerate too-short paths in tiers where
/// intermediate hubs are expected.
pub fn underuse_penalty(stops: &[usize], constraints: &RouteConstraints) -> f64 {
    let interior_budget = constraints.max_stops.saturating_sub(2);
    let interior_stops = stops.len().saturating_sub(2);

    UNDERUSE_PENALTY_WEIGHT * interior_budget.saturating_sub(interior_stops) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Location;

    fn grid_matrix() -> DistanceMatrix {
        let locations: Vec<Location> = (0..5)
            .map(|i| Location {
                id: format!("L{i}"),
                name: format!("L{i}"),
                address: String::new(),
                district: "d".to_string(),
                province: "p".to_string(),
                latitude: 10.0 + 0.01 * i as f64,
                longitude: 106.0,
            })
            .collect();
        DistanceMatrix::build(&locations)
    }

    fn budget(max_stops: usize) -> RouteConstraints {
        RouteConstraints {
            max_stops,
            max_transit_hubs: 1,
            max_same_district_stops: 1,
        }
    }

    #[test]
    fn wrong_endpoints_score_infinite() {
        let dm = grid_matrix();
        let constraints = budget(5);

        assert_eq!(find_fitness(&[1, 2, 4], 0, 4, &constraints, &dm), f64::INFINITY);
        assert_eq!(find_fitness(&[0, 2, 3], 0, 4, &constraints, &dm), f64::INFINITY);
        assert_eq!(find_fitness(&[4], 0, 4, &constraints, &dm), f64::INFINITY);
    }

    #[test]
    fn over_length_scores_infinite() {
        let dm = grid_matrix();
        let constraints = budget(3);

        assert_eq!(
            find_fitness(&[0, 1, 2, 3, 4], 0, 4, &constraints, &dm),
            f64::INFINITY
        );
    }

    #[test]
    fn underused_budget_is_penalized() {
        let dm = grid_matrix();
        let constraints = budget(5);

        // one interior stop against a budget of three: penalty 10 * 2
        let short = find_fitness(&[0, 2, 4], 0, 4, &constraints, &dm);
        assert!((short - (dm.route_distance(&[0, 2, 4]) + 20.0)).abs() < 1e-9);

        // full use of the budget carries no penalty
        let full = find_fitness(&[0, 1, 2, 3, 4], 0, 4, &constraints, &dm);
        assert!((full - dm.route_distance(&[0, 1, 2, 3, 4])).abs() < 1e-9);
    }
}
