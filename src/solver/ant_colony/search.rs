use rand::Rng;
use tracing::{debug, span, trace, Level};

use crate::config::AcoParams;
use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::{Route, RouteConstraints};
use crate::evaluation::fitness::satisfies_shape;

use super::pheromone::PheromoneMatrix;

/// Guards the inverse-distance heuristic and deposit amounts against
/// co-located points at zero distance.
const EPSILON: f64 = 1e-6;

/// Pheromone-biased probabilistic route construction. One instance owns
/// a fresh pheromone matrix for the duration of a single `run` call.
pub struct AntColonyRouteOptimizer<'a> {
    dm: &'a DistanceMatrix,
    start: usize,
    end: usize,
    constraints: RouteConstraints,
    params: AcoParams,
    pheromone: PheromoneMatrix,
}

impl<'a> AntColonyRouteOptimizer<'a> {
    pub fn new(
        dm: &'a DistanceMatrix,
        start: usize,
        end: usize,
        constraints: RouteConstraints,
        params: AcoParams,
    ) -> Self {
        let pheromone = PheromoneMatrix::new(dm.len(), params.initial_pheromone);
        AntColonyRouteOptimizer {
            dm,
            start,
            end,
            constraints,
            params,
            pheromone,
        }
    }

    /// Construct and reinforce routes across iterations, returning the
    /// lowest-distance valid route seen. The seed route's edges receive
    /// one extra deposit up front so the trail starts biased toward the
    /// genetic result; construction itself is independent of the seed's
    /// ordering. If no ant ever produces a valid route, the direct
    /// pickup-to-delivery edge is returned instead.
    pub fn run<R: Rng>(&mut self, seed: &Route, rng: &mut R) -> Route {
        if seed.stops.len() >= 2 {
            let seed_distance = self.dm.route_distance(&seed.stops);
            self.pheromone
                .deposit(&seed.stops, self.params.q / (seed_distance + EPSILON));
        }

        let mut best: Option<Route> = None;

        for iteration in 0..self.params.iterations {
            let iter_span = span!(Level::TRACE, "aco_iteration", iteration);
            let _guard = iter_span.enter();

            let mut valid_routes: Vec<Vec<usize>> = Vec::with_capacity(self.params.ant_count);

            for _ in 0..self.params.ant_count {
                let stops = self.construct_route(rng);

                // ants that broke the endpoint or budget invariant are
                // discarded: no deposit, no best-tracking
                if !satisfies_shape(&stops, self.start, self.end, &self.constraints) {
                    continue;
                }

                let distance = self.dm.route_distance(&stops);
                if best.as_ref().map_or(true, |b| distance < b.fitness) {
                    trace!(iteration, distance, "new best ant route");
                    best = Some(Route {
                        stops: stops.clone(),
                        fitness: distance,
                    });
                }
                valid_routes.push(stops);
            }

            self.pheromone.evaporate(self.params.evaporation_rate);
            for stops in &valid_routes {
                let distance = self.dm.route_distance(stops);
                self.pheromone
                    .deposit(stops, self.params.q / (distance + EPSILON));
            }
        }

        match best {
            Some(route) => {
                debug!(distance = route.fitness, stops = ?route.stops, "ant colony finished");
                route
            }
            None => {
                debug!("no ant produced a feasible route, falling back to the direct edge");
                Route::direct(self.start, self.end, self.dm.get(self.start, self.end))
            }
        }
    }

    /// One ant's walk from pickup towards delivery, bounded by the stop
    /// budget. The delivery point is force-appended if the walk ran out
    /// of budget before reaching it.
    fn construct_route<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut stops = vec![self.start];
        let mut visited = vec![false; self.dm.len()];
        visited[self.start] = true;

        let mut current = self.start;
        while current != self.end && stops.len() < self.constraints.max_stops {
            let next = self.select_next(current, &visited, stops.len(), rng);
            stops.push(next);
            visited[next] = true;
            current = next;
        }

        if current != self.end {
            stops.push(self.end);
        }
        stops
    }

    /// Roulette selection over unvisited nodes, weighted by
    /// `pheromone^alpha * (1/(distance+eps))^beta`. The delivery point is
    /// excluded until either the budget forces it or nothing else
    /// qualifies.
    fn select_next<R: Rng>(
        &self,
        current: usize,
        visited: &[bool],
        steps_used: usize,
        rng: &mut R,
    ) -> usize {
        if steps_used >= self.constraints.max_stops.saturating_sub(1) {
            return self.end;
        }

        let available: Vec<usize> = (0..self.dm.len())
            .filter(|&node| !visited[node] && node != self.end)
            .collect();
        if available.is_empty() {
            return self.end;
        }

        let weights: Vec<f64> = available
            .iter()
            .map(|&node| {
                let trail = self.pheromone.get(current, node).powf(self.params.alpha);
                let heuristic =
                    (1.0 / (self.dm.get(current, node) + EPSILON)).powf(self.params.beta);
                trail * heuristic
            })
            .collect();

        let total: f64 = weights.iter().sum();
        let mut draw = rng.gen::<f64>() * total;
        for (&node, weight) in available.iter().zip(&weights) {
            draw -= weight;
            if draw <= 0.0 {
                return node;
            }
        }

        available[0]
    }
}
