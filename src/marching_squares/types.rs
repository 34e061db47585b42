use godot::prelude::*;

use crate::error::SquareError;

// =====================
// ===== Constants =====
// =====================

pub const CORNER_COUNT: usize = 4;
pub const CONFIGURATION_COUNT: usize = 16;

// =====================
// ===== Types  ========
// =====================

/// Cell corner, numbered in sample order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopRight = 0,
    BottomRight = 1,
    BottomLeft = 2,
    TopLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; CORNER_COUNT] = [
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
        Corner::TopLeft,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit this corner contributes to a `Configuration`.
    #[must_use]
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    #[must_use]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Crossing point on one of the four cell edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgePoint {
    TopCenter,
    RightCenter,
    BottomCenter,
    LeftCenter,
}

impl EdgePoint {
    pub const ALL: [EdgePoint; 4] = [
        EdgePoint::TopCenter,
        EdgePoint::RightCenter,
        EdgePoint::BottomCenter,
        EdgePoint::LeftCenter,
    ];

    /// Corners bounding the edge as (from, to). Fractions are measured from `from`.
    #[must_use]
    pub fn endpoints(self) -> (Corner, Corner) {
        match self {
            EdgePoint::TopCenter => (Corner::TopLeft, Corner::TopRight),
            EdgePoint::RightCenter => (Corner::TopRight, Corner::BottomRight),
            EdgePoint::BottomCenter => (Corner::BottomLeft, Corner::BottomRight),
            EdgePoint::LeftCenter => (Corner::TopLeft, Corner::BottomLeft),
        }
    }
}

/// Vertex selector used by the case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellPoint {
    Corner(Corner),
    Edge(EdgePoint),
}

/// 4-bit corner mask. Bit i is set when corner i samples above the iso value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Configuration(pub u8); // 0-15

impl Configuration {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(15);

    /// Classify the four samples against `iso_value`.
    ///
    /// The comparison is strict: a sample equal to the iso value counts as below.
    #[must_use]
    pub fn classify(iso_value: f32, values: &SampleValues) -> Self {
        let mut mask = 0u8;
        for corner in Corner::ALL {
            if values.get(corner) > iso_value {
                mask |= corner.bit();
            }
        }
        Self(mask)
    }

    #[must_use]
    pub fn is_above(self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }

    /// True when the contour passes through the cell.
    #[must_use]
    pub fn has_crossing(self) -> bool {
        self != Self::EMPTY && self != Self::FULL
    }

    /// Diagonal corners agree, adjacent corners disagree.
    #[must_use]
    pub fn is_saddle(self) -> bool {
        matches!(self.0, 5 | 10)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One scalar sample per corner, in `Corner` order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleValues([f32; CORNER_COUNT]);

impl SampleValues {
    #[must_use]
    pub fn new(top_right: f32, bottom_right: f32, bottom_left: f32, top_left: f32) -> Self {
        Self([top_right, bottom_right, bottom_left, top_left])
    }

    #[must_use]
    pub fn get(&self, corner: Corner) -> f32 {
        self.0[corner.index()]
    }

    #[must_use]
    pub fn as_array(&self) -> &[f32; CORNER_COUNT] {
        &self.0
    }
}

impl From<[f32; CORNER_COUNT]> for SampleValues {
    fn from(values: [f32; CORNER_COUNT]) -> Self {
        Self(values)
    }
}

impl TryFrom<&[f32]> for SampleValues {
    type Error = SquareError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        <[f32; CORNER_COUNT]>::try_from(values)
            .map(Self)
            .map_err(|_| SquareError::InvalidSampleCount {
                expected: CORNER_COUNT,
                got: values.len(),
            })
    }
}

/// Fixed corner positions of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_right: Vector2,
    pub bottom_right: Vector2,
    pub bottom_left: Vector2,
    pub top_left: Vector2,
}

impl Corners {
    /// Walk clockwise from the top-right corner. Y is up.
    #[must_use]
    pub fn around(position: Vector2, grid_scale: f32) -> Self {
        let half = grid_scale / 2.0;
        let top_right = position + Vector2::new(half, half);
        let bottom_right = top_right + Vector2::new(0.0, -grid_scale);
        let bottom_left = bottom_right + Vector2::new(-grid_scale, 0.0);
        let top_left = bottom_left + Vector2::new(0.0, grid_scale);
        Self {
            top_right,
            bottom_right,
            bottom_left,
            top_left,
        }
    }

    #[must_use]
    pub fn get(&self, corner: Corner) -> Vector2 {
        match corner {
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::TopLeft => self.top_left,
        }
    }
}

/// Triangles emitted for one cell. Indices are local to `vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellFragment {
    pub vertices: Vec<Vector3>,
    pub triangles: Vec<i32>,
}

impl CellFragment {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Resolve each index triple to positions. Triples with an invalid index are skipped.
    pub fn triangle_vertices(&self) -> impl Iterator<Item = [Vector3; 3]> + '_ {
        self.triangles.chunks_exact(3).filter_map(|tri| {
            let a = self.vertex(tri[0])?;
            let b = self.vertex(tri[1])?;
            let c = self.vertex(tri[2])?;
            Some([a, b, c])
        })
    }

    fn vertex(&self, index: i32) -> Option<Vector3> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.vertices.get(i))
            .copied()
    }
}
