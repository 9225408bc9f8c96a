//! Shipment route optimization core.
//!
//! A genetic algorithm explores hub orderings globally and seeds an ant
//! colony optimizer that refines the route through pheromone-biased
//! construction, all over a haversine distance matrix and under stop
//! budgets derived from how administratively close pickup and delivery
//! are. See `pipeline::optimize_route` for the caller-facing entry point.

pub mod config;
pub mod distance;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod pipeline;
pub mod policy;
pub mod solver;
