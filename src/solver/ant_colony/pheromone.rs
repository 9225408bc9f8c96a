/// Directed-edge desirability weights, same indexing as the distance
/// matrix. Initialized to a constant, then evaporated and reinforced in
/// place each iteration. Owned exclusively by one ant colony run.
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    cells: Vec<Vec<f64>>,
}

impl PheromoneMatrix {
    pub fn new(size: usize, initial: f64) -> Self {
        PheromoneMatrix {
            cells: vec![vec![initial; size]; size],
        }
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from][to]
    }

    /// Uniform multiplicative decay across every edge.
    pub fn evaporate(&mut self, rate: f64) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell *= 1.0 - rate;
            }
        }
    }

    /// Reinforce each directed edge traversed by `stops` with `amount`.
    pub fn deposit(&mut self, stops: &[usize], amount: f64) {
        for pair in stops.windows(2) {
            self.cells[pair[0]][pair[1]] += amount;
        }
    }
}
