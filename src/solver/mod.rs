pub mod ant_colony;
pub mod genetic;
