pub mod pheromone;
pub mod search;

pub use pheromone::*;
pub use search::*;
