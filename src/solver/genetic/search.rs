use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, span, trace, Level};

use crate::config::GaParams;
use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::{Route, RouteConstraints};
use crate::evaluation::fitness::{find_fitness, satisfies_shape};

use super::operators::{order_crossover, swap_mutation};

/// Population-based global search over intermediate-hub orderings. One
/// instance owns its population for the duration of a single `run` call;
/// nothing is shared across requests.
pub struct GeneticRouteOptimizer<'a> {
    dm: &'a DistanceMatrix,
    start: usize,
    end: usize,
    constraints: RouteConstraints,
    params: GaParams,
    population: Vec<Route>,
}

impl<'a> GeneticRouteOptimizer<'a> {
    pub fn new(
        dm: &'a DistanceMatrix,
        start: usize,
        end: usize,
        constraints: RouteConstraints,
        params: GaParams,
    ) -> Self {
        GeneticRouteOptimizer {
            dm,
            start,
            end,
            constraints,
            params,
            population: vec![],
        }
    }

    /// Evolve hub orderings for a fixed number of generations and return
    /// the fittest individual of the final population. With no candidate
    /// hubs (or no interior budget) the trivial pickup-to-delivery route
    /// is returned directly.
    pub fn run<R: Rng>(&mut self, intermediate: &[usize], rng: &mut R) -> Route {
        let interior_budget = self.constraints.max_stops.saturating_sub(2);
        if intermediate.is_empty() || interior_budget == 0 || self.params.population_size == 0 {
            debug!("no usable intermediate hubs, returning the direct route");
            return Route::direct(self.start, self.end, self.dm.get(self.start, self.end));
        }

        self.population = (0..self.params.population_size)
            .map(|_| self.create_individual(intermediate, interior_budget, rng))
            .collect();

        for generation in 0..self.params.generations {
            let gen_span = span!(Level::TRACE, "generation", generation);
            let _guard = gen_span.enter();

            self.score_and_sort();
            trace!("best fitness {:.3}", self.population[0].fitness);

            let mut next: Vec<Route> = self
                .population
                .iter()
                .take(self.params.elitism_count.min(self.params.population_size))
                .cloned()
                .collect();

            while next.len() < self.params.population_size {
                let parent1 = self.tournament(rng);
                let parent2 = self.tournament(rng);
                let mut child = order_crossover(&parent1.stops, &parent2.stops, rng);
                swap_mutation(&mut child, self.params.mutation_rate, rng);

                // crossover pins the endpoints, but a broken child is
                // rejected rather than repaired: retry selection
                if !satisfies_shape(&child, self.start, self.end, &self.constraints) {
                    continue;
                }
                next.push(Route {
                    stops: child,
                    fitness: 0.0,
                });
            }

            self.population = next;
        }

        self.score_and_sort();
        let best = self.population[0].clone();
        debug!(fitness = best.fitness, stops = ?best.stops, "genetic search finished");
        best
    }

    /// One individual: a shuffled permutation of the candidate hubs,
    /// truncated to the interior budget (excess hubs are dropped, not
    /// rotated in), wrapped in the fixed endpoints.
    fn create_individual<R: Rng>(
        &self,
        intermediate: &[usize],
        interior_budget: usize,
        rng: &mut R,
    ) -> Route {
        let mut hubs = intermediate.to_vec();
        hubs.shuffle(rng);
        hubs.truncate(interior_budget);

        let mut stops = Vec::with_capacity(hubs.len() + 2);
        stops.push(self.start);
        stops.extend(hubs);
        stops.push(self.end);

        Route {
            stops,
            fitness: 0.0,
        }
    }

    /// Score every individual (fitness evaluation only reads the matrix,
    /// so generations are scored in parallel) and sort ascending.
    fn score_and_sort(&mut self) {
        let (start, end) = (self.start, self.end);
        let constraints = self.constraints;
        let dm = self.dm;

        self.population.par_iter_mut().for_each(|individual| {
            let fitness = find_fitness(&individual.stops, start, end, &constraints, dm);
            individual.fitness = fitness;
        });

        self.population
            .sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    }

    /// Tournament selection: the fittest of a small uniform sample drawn
    /// with replacement.
    fn tournament<R: Rng>(&self, rng: &mut R) -> &Route {
        let mut best = &self.population[rng.gen_range(0..self.population.len())];
        for _ in 1..self.params.tournament_size {
            let challenger = &self.population[rng.gen_range(0..self.population.len())];
            if challenger.fitness < best.fitness {
                best = challenger;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Location;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture_locations(count: usize) -> Vec<Location> {
        (0..count)
            .map(|i| Location {
                id: format!("L{i}"),
                name: format!("L{i}"),
                address: String::new(),
                district: "d".to_string(),
                province: "p".to_string(),
                latitude: 10.0 + 0.013 * ((i * 7) % 11) as f64,
                longitude: 106.0 + 0.017 * ((i * 3) % 13) as f64,
            })
            .collect()
    }

    fn constraints(max_stops: usize) -> RouteConstraints {
        RouteConstraints {
            max_stops,
            max_transit_hubs: 1,
            max_same_district_stops: 1,
        }
    }

    #[test]
    fn empty_intermediates_return_the_direct_route() {
        let locations = fixture_locations(2);
        let dm = DistanceMatrix::build(&locations);
        let mut ga = GeneticRouteOptimizer::new(&dm, 0, 1, constraints(5), GaParams::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let route = ga.run(&[], &mut rng);
        assert_eq!(route.stops, vec![0, 1]);
    }

    #[test]
    fn zero_interior_budget_returns_the_direct_route() {
        let locations = fixture_locations(4);
        let dm = DistanceMatrix::build(&locations);
        let mut ga = GeneticRouteOptimizer::new(&dm, 0, 3, constraints(2), GaParams::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let route = ga.run(&[1, 2], &mut rng);
        assert_eq!(route.stops, vec![0, 3]);
    }

    #[test]
    fn evolved_routes_keep_the_invariants() {
        let locations = fixture_locations(8);
        let dm = DistanceMatrix::build(&locations);
        let budget = constraints(5);
        let mut ga = GeneticRouteOptimizer::new(&dm, 0, 7, budget, GaParams::default());
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let route = ga.run(&[1, 2, 3, 4, 5, 6], &mut rng);

        assert_eq!(route.stops[0], 0);
        assert_eq!(*route.stops.last().unwrap(), 7);
        assert!(route.stops.len() <= budget.max_stops);
        assert!(route.fitness.is_finite());

        let mut seen = route.stops.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), route.stops.len());
    }

    #[test]
    fn identical_seeds_give_identical_routes() {
        let locations = fixture_locations(7);
        let dm = DistanceMatrix::build(&locations);
        let budget = constraints(5);
        let intermediate = [1, 2, 3, 4, 5];

        let run = |seed: u64| {
            let mut ga =
                GeneticRouteOptimizer::new(&dm, 0, 6, budget, GaParams::default());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            ga.run(&intermediate, &mut rng)
        };

        assert_eq!(run(99).stops, run(99).stops);
    }
}
