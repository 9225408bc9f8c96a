pub mod constant {
    /// Average courier speed used for the ETA estimate.
    pub const AVERAGE_SPEED_KMH: f64 = 40.0;
    /// Default seed for reproducible demo runs.
    pub const SEED: u64 = 12345;
    /// Number of fixture locations the demo binary generates.
    pub const LOCATION_COUNT: usize = 8;
}

/// Genetic optimizer tunables.
#[derive(Debug, Clone)]
pub struct GaParams {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub generations: usize,
    pub elitism_count: usize,
    pub tournament_size: usize,
}

impl Default for GaParams {
    fn default() -> Self {
        GaParams {
            population_size: 50,
            mutation_rate: 0.1,
            generations: 100,
            elitism_count: 2,
            tournament_size: 5,
        }
    }
}

/// Ant colony tunables. `alpha` weighs the pheromone trail, `beta` the
/// inverse-distance heuristic.
#[derive(Debug, Clone)]
pub struct AcoParams {
    pub ant_count: usize,
    pub iterations: usize,
    pub alpha: f64,
    pub beta: f64,
    pub evaporation_rate: f64,
    pub q: f64,
    pub initial_pheromone: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        AcoParams {
            ant_count: 30,
            iterations: 50,
            alpha: 1.0,
            beta: 3.0,
            evaporation_rate: 0.4,
            q: 100.0,
            initial_pheromone: 1.0,
        }
    }
}

/// Bundle of both solvers' parameters, overridable field by field.
#[derive(Debug, Clone, Default)]
pub struct SolverParams {
    pub ga: GaParams,
    pub aco: AcoParams,
}
