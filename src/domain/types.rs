use serde::{Deserialize, Serialize};

/// A depot or hub in the location graph. Immutable for the duration of an
/// optimization run; the caller owns the collection and passes a slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub district: String,
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Routing budget for one shipment, derived once per request from how
/// administratively close pickup and delivery are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConstraints {
    pub max_stops: usize,
    pub max_transit_hubs: usize,
    pub max_same_district_stops: usize,
}

/// An ordered sequence of location indices with its score. Invariant:
/// first stop is the pickup index, last is the delivery index, no index
/// repeats, and the length stays within the stop budget. The fitness
/// field carries whichever score its producer assigned (penalized
/// fitness for the genetic optimizer, raw distance for the ant colony).
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub stops: Vec<usize>,
    pub fitness: f64,
}

impl Route {
    /// The trivial pickup-to-delivery route, used as a fallback whenever
    /// no feasible multi-stop route is found.
    pub fn direct(start: usize, end: usize, distance: f64) -> Self {
        Route {
            stops: vec![start, end],
            fitness: distance,
        }
    }
}
