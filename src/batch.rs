//! Parallel triangulation of independent cells.
//!
//! Every request gets its own `Square`, so no triangulation buffers are
//! shared between rayon tasks. Fragments keep cell-local indices; merging
//! them into one mesh is left to the caller.

use godot::prelude::*;
use rayon::prelude::*;

use crate::error::SquareError;
use crate::marching_squares::{CellFragment, SampleValues, Square, CORNER_COUNT};
use crate::params::SquareParams;

/// Below this many cells the rayon overhead is not worth it.
const MIN_PARALLEL_BATCH: usize = 16;

/// One cell to triangulate: its center and corner samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRequest {
    pub position: Vector2,
    pub values: SampleValues,
}

impl CellRequest {
    pub fn new(position: Vector2, values: [f32; CORNER_COUNT]) -> Self {
        Self {
            position,
            values: SampleValues::from(values),
        }
    }
}

/// Triangulate every request with the shared `params`.
/// Results come back in request order.
pub fn triangulate_cells(
    requests: &[CellRequest],
    params: &SquareParams,
) -> Vec<Result<CellFragment, SquareError>> {
    if requests.len() < MIN_PARALLEL_BATCH {
        return requests
            .iter()
            .map(|request| triangulate_request(request, params))
            .collect();
    }

    requests
        .par_iter()
        .map(|request| triangulate_request(request, params))
        .collect()
}

fn triangulate_request(
    request: &CellRequest,
    params: &SquareParams,
) -> Result<CellFragment, SquareError> {
    let mut square = Square::from_params(request.position, params)?;
    Ok(square.triangulate(params.iso_value, &request.values))
}
