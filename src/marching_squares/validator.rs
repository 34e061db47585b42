use std::collections::HashMap;

use godot::prelude::*;

use super::square::Square;
use super::types::CellFragment;

const EPSILON: f32 = 1e-5;

/// Structural problem found in a cell fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentIssue {
    /// Index list length is not a multiple of 3.
    PartialTriangle { index_count: usize },
    IndexOutOfRange {
        triangle: usize,
        index: i32,
        vertex_count: usize,
    },
    NonFiniteVertex { vertex: usize },
    VertexOutsideCell { vertex: usize, position: Vector3 },
    /// Winds against the rest of the table (Y up, clockwise expected).
    CounterClockwise { triangle: usize, signed_area: f32 },
}

/// Result of validating a single cell's fragment.
pub struct ValidationResult {
    pub issues: Vec<FragmentIssue>,
    /// Zero-area triangles. Reported apart from `issues` since the reference
    /// table emits one for configuration 1.
    pub degenerate_triangles: usize,
    pub is_valid: bool,
}

/// Canonical edge key using bit-exact float hashing.
/// Edges are ordered so (A,B) == (B,A).
#[derive(Hash, Eq, PartialEq)]
struct EdgeKey([u32; 6]); // [x1,y1,z1, x2,y2,z2] with v1 < v2 lexicographically

fn vertex_to_bits(v: Vector3) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

fn make_edge_key(a: Vector3, b: Vector3) -> EdgeKey {
    let ba = vertex_to_bits(a);
    let bb = vertex_to_bits(b);
    // Lexicographic ordering on bit representations
    if ba < bb {
        EdgeKey([ba[0], ba[1], ba[2], bb[0], bb[1], bb[2]])
    } else {
        EdgeKey([bb[0], bb[1], bb[2], ba[0], ba[1], ba[2]])
    }
}

/// Axis-aligned bounds of a square.
struct CellBounds {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl CellBounds {
    fn of(square: &Square) -> Self {
        let corners = square.corners();
        Self {
            min_x: corners.bottom_left.x,
            max_x: corners.top_right.x,
            min_y: corners.bottom_left.y,
            max_y: corners.top_right.y,
        }
    }

    fn contains(&self, v: Vector3) -> bool {
        v.x >= self.min_x - EPSILON
            && v.x <= self.max_x + EPSILON
            && v.y >= self.min_y - EPSILON
            && v.y <= self.max_y + EPSILON
    }

    /// Check if an edge lies on the cell perimeter (both vertices share the same side).
    fn is_boundary_edge(&self, a: Vector3, b: Vector3) -> bool {
        let on = |p: f32, q: f32, side: f32| (p - side).abs() < EPSILON && (q - side).abs() < EPSILON;
        on(a.x, b.x, self.min_x)
            || on(a.x, b.x, self.max_x)
            || on(a.y, b.y, self.min_y)
            || on(a.y, b.y, self.max_y)
    }
}

/// Twice the signed area in the XY plane. Negative is clockwise.
fn signed_area_2x(a: Vector3, b: Vector3, c: Vector3) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Validate a fragment emitted by `square`.
///
/// Checks index bounds, vertex placement and winding. Degenerate triangles
/// are counted but do not make the fragment invalid.
pub fn validate_fragment(fragment: &CellFragment, square: &Square) -> ValidationResult {
    let bounds = CellBounds::of(square);
    let degenerate_area = square.degenerate_area();
    let vertex_count = fragment.vertices.len();
    let mut issues = Vec::new();
    let mut degenerate_triangles = 0;

    if fragment.triangles.len() % 3 != 0 {
        issues.push(FragmentIssue::PartialTriangle {
            index_count: fragment.triangles.len(),
        });
    }

    for (vertex, &position) in fragment.vertices.iter().enumerate() {
        if !(position.x.is_finite() && position.y.is_finite() && position.z.is_finite()) {
            issues.push(FragmentIssue::NonFiniteVertex { vertex });
        } else if !bounds.contains(position) {
            issues.push(FragmentIssue::VertexOutsideCell { vertex, position });
        }
    }

    for (triangle, tri) in fragment.triangles.chunks_exact(3).enumerate() {
        let mut corners = [Vector3::ZERO; 3];
        let mut in_range = true;
        for (slot, &index) in tri.iter().enumerate() {
            match usize::try_from(index).ok().filter(|&i| i < vertex_count) {
                Some(i) => corners[slot] = fragment.vertices[i],
                None => {
                    in_range = false;
                    issues.push(FragmentIssue::IndexOutOfRange {
                        triangle,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        if !in_range {
            continue;
        }

        let signed_area = signed_area_2x(corners[0], corners[1], corners[2]) * 0.5;
        if signed_area.abs() <= degenerate_area {
            degenerate_triangles += 1;
        } else if signed_area > 0.0 {
            issues.push(FragmentIssue::CounterClockwise {
                triangle,
                signed_area,
            });
        }
    }

    let is_valid = issues.is_empty();
    ValidationResult {
        issues,
        degenerate_triangles,
        is_valid,
    }
}

/// Edges of the fragment that separate inside from outside within the cell.
///
/// Extracts triangle edges and counts occurrences. Fan diagonals appear twice
/// and perimeter edges lie on the cell boundary; what remains is the contour.
pub fn contour_segments(fragment: &CellFragment, square: &Square) -> Vec<(Vector3, Vector3)> {
    let bounds = CellBounds::of(square);

    // Count edge occurrences, keeping first-seen order for stable output
    let mut edge_counts: HashMap<EdgeKey, usize> = HashMap::new();
    let mut ordered: Vec<(Vector3, Vector3)> = Vec::new();

    for [v0, v1, v2] in fragment.triangle_vertices() {
        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            let count = edge_counts.entry(make_edge_key(a, b)).or_insert(0);
            if *count == 0 {
                ordered.push((a, b));
            }
            *count += 1;
        }
    }

    ordered
        .into_iter()
        .filter(|&(a, b)| {
            edge_counts[&make_edge_key(a, b)] == 1 && !bounds.is_boundary_edge(a, b)
        })
        .collect()
}
