use itertools::Itertools;
use tracing::debug;

use crate::domain::types::Location;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Pairwise great-circle distance table in kilometres. Symmetric with an
/// exactly-zero diagonal; built once per optimization run and read-only
/// to the solvers.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    cells: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn build(locations: &[Location]) -> Self {
        let size = locations.len();
        let mut cells = vec![vec![0.0; size]; size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d = haversine(&locations[i], &locations[j]);
                cells[i][j] = d;
                cells[j][i] = d;
            }
        }

        debug!("built {size}x{size} distance matrix");
        DistanceMatrix { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from][to]
    }

    /// Sum of consecutive-edge distances along a route.
    pub fn route_distance(&self, stops: &[usize]) -> f64 {
        stops
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| self.cells[from][to])
            .sum()
    }
}

/// Haversine distance between two locations, Earth radius 6371 km.
/// Invalid coordinates (NaN) propagate as NaN; the pipeline rejects them
/// before this stage.
pub fn haversine(a: &Location, b: &Location) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    // rounding can push h past 1 for near-antipodal points, which would
    // turn the sqrt below into NaN
    let h = ((d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2))
    .min(1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
