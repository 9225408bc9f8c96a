use thiserror::Error;

/// Input validation failures surfaced at the orchestrator boundary.
/// Infeasible searches never appear here; they degrade into the direct
/// pickup-to-delivery route inside the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("no locations were supplied")]
    EmptyLocations,

    #[error("location index {index} is out of bounds for {len} locations")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("pickup and delivery must resolve to distinct locations")]
    StartEqualsEnd,

    #[error("location '{id}' has non-finite or out-of-range coordinates")]
    InvalidCoordinates { id: String },
}
