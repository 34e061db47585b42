use godot::prelude::*;

use super::cases::CaseTable;
use super::interpolation::EdgePoints;
use super::types::{CellFragment, CellPoint, Configuration, Corner, Corners, SampleValues};
use super::validator::validate_fragment;
use crate::debug_log::{
    compute_area_stats, count_duplicate_positions, debug_log, debug_log_enabled,
};
use crate::error::SquareError;
use crate::params::SquareParams;

/// Triangles below this share of the cell area count as degenerate.
const DEGENERATE_AREA_FRACTION: f32 = 1e-5;
/// Duplicate-position tolerance as a share of the cell edge.
const DUPLICATE_POSITION_FRACTION: f32 = 1e-5;

/// One grid cell. Corners are fixed at construction; the last emitted
/// fragment is kept so it can be read back with `vertices`/`triangles`.
#[derive(Clone, Debug)]
pub struct Square {
    position: Vector2,
    grid_scale: f32,
    corners: Corners,
    case_table: CaseTable,
    fragment: CellFragment,
}

impl Square {
    pub fn new(position: Vector2, grid_scale: f32) -> Result<Self, SquareError> {
        if !(grid_scale.is_finite() && grid_scale > 0.0) {
            return Err(SquareError::InvalidGridScale { grid_scale });
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(SquareError::NonFinitePosition {
                x: position.x,
                y: position.y,
            });
        }

        Ok(Self {
            position,
            grid_scale,
            corners: Corners::around(position, grid_scale),
            case_table: CaseTable::default(),
            fragment: CellFragment::default(),
        })
    }

    pub fn from_params(position: Vector2, params: &SquareParams) -> Result<Self, SquareError> {
        Ok(Self::new(position, params.grid_scale)?.with_case_table(params.case_table))
    }

    #[must_use]
    pub fn with_case_table(mut self, case_table: CaseTable) -> Self {
        self.case_table = case_table;
        self
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn grid_scale(&self) -> f32 {
        self.grid_scale
    }

    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    pub fn corner(&self, corner: Corner) -> Vector2 {
        self.corners.get(corner)
    }

    pub fn case_table(&self) -> CaseTable {
        self.case_table
    }

    /// Area at or below which a triangle in this cell is treated as degenerate.
    /// Proportional to the cell area.
    pub fn degenerate_area(&self) -> f32 {
        DEGENERATE_AREA_FRACTION * self.grid_scale * self.grid_scale
    }

    /// Edge points before any interpolation: the middle of each edge.
    pub fn edge_midpoints(&self) -> EdgePoints {
        EdgePoints::midpoints(&self.corners)
    }

    pub fn configuration(&self, iso_value: f32, values: &SampleValues) -> Configuration {
        Configuration::classify(iso_value, values)
    }

    pub fn interpolate(&self, iso_value: f32, values: &SampleValues) -> EdgePoints {
        EdgePoints::interpolate(&self.corners, iso_value, values)
    }

    /// Rebuild the fragment for these samples and return a copy of it.
    pub fn triangulate(&mut self, iso_value: f32, values: &SampleValues) -> CellFragment {
        self.fragment.clear();

        let configuration = self.configuration(iso_value, values);
        let edges = self.interpolate(iso_value, values);
        let row = self.case_table.row(configuration);

        let corners = &self.corners;
        self.fragment.vertices.extend(
            row.points
                .iter()
                .map(|&point| to_vertex(resolve_point(corners, &edges, point))),
        );
        self.fragment
            .triangles
            .extend(row.triangles.iter().flatten().copied());

        if diagnostics_enabled() {
            self.log_fragment_issues(configuration);
        }

        self.fragment.clone()
    }

    /// Copy of the vertices from the last `triangulate` call.
    pub fn vertices(&self) -> Vec<Vector3> {
        self.fragment.vertices.clone()
    }

    /// Copy of the triangle indices from the last `triangulate` call.
    pub fn triangles(&self) -> Vec<i32> {
        self.fragment.triangles.clone()
    }

    fn log_fragment_issues(&self, configuration: Configuration) {
        let result = validate_fragment(&self.fragment, self);
        if !result.is_valid {
            debug_log(&format!(
                "[triangulate] ({:.3}, {:.3}) config={}: {} issues: {:?}",
                self.position.x,
                self.position.y,
                configuration.0,
                result.issues.len(),
                result.issues
            ));
        }

        let stats = compute_area_stats(&self.fragment, self.degenerate_area());
        if stats.degenerate_count > 0 {
            debug_log(&format!(
                "[triangulate] ({:.3}, {:.3}) config={}: degenerate={}, duplicate_positions={}, area={:.4}",
                self.position.x,
                self.position.y,
                configuration.0,
                stats.degenerate_count,
                count_duplicate_positions(
                    &self.fragment.vertices,
                    DUPLICATE_POSITION_FRACTION * self.grid_scale
                ),
                stats.total_area
            ));
        }
    }
}

/// Fragment checks only run in debug builds with the log file open.
fn diagnostics_enabled() -> bool {
    cfg!(debug_assertions) && debug_log_enabled()
}

fn resolve_point(corners: &Corners, edges: &EdgePoints, point: CellPoint) -> Vector2 {
    match point {
        CellPoint::Corner(corner) => corners.get(corner),
        CellPoint::Edge(edge) => edges.get(edge),
    }
}

#[inline]
fn to_vertex(point: Vector2) -> Vector3 {
    Vector3::new(point.x, point.y, 0.0)
}
