use super::types::{CellPoint, Configuration, Corner, EdgePoint, CONFIGURATION_COUNT};

const TR: CellPoint = CellPoint::Corner(Corner::TopRight);
const BR: CellPoint = CellPoint::Corner(Corner::BottomRight);
const BL: CellPoint = CellPoint::Corner(Corner::BottomLeft);
const TL: CellPoint = CellPoint::Corner(Corner::TopLeft);
const TC: CellPoint = CellPoint::Edge(EdgePoint::TopCenter);
const RC: CellPoint = CellPoint::Edge(EdgePoint::RightCenter);
const BC: CellPoint = CellPoint::Edge(EdgePoint::BottomCenter);
const LC: CellPoint = CellPoint::Edge(EdgePoint::LeftCenter);

/// Polygon for one configuration: ordered fan vertices and their index triples.
#[derive(Debug, PartialEq, Eq)]
pub struct CaseRow {
    pub points: &'static [CellPoint],
    pub triangles: &'static [[i32; 3]],
}

/// Every row winds clockwise (Y up) and fans out from its first point.
static REFERENCE_CASES: [CaseRow; CONFIGURATION_COUNT] = [
    // 0: nothing above
    CaseRow {
        points: &[],
        triangles: &[],
    },
    // 1: top right. Repeats TC, so the triangle has no area.
    CaseRow {
        points: &[TC, RC, TC],
        triangles: &[[0, 1, 2]],
    },
    // 2: bottom right
    CaseRow {
        points: &[RC, BR, BC],
        triangles: &[[0, 1, 2]],
    },
    // 3: right half
    CaseRow {
        points: &[TR, BR, BC, TC],
        triangles: &[[0, 1, 2], [0, 2, 3]],
    },
    // 4: bottom left
    CaseRow {
        points: &[BC, BL, LC],
        triangles: &[[0, 1, 2]],
    },
    // 5: saddle, top right + bottom left joined through the center
    CaseRow {
        points: &[TR, RC, BC, BL, LC, TC],
        triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]],
    },
    // 6: bottom half
    CaseRow {
        points: &[BR, BL, LC, RC],
        triangles: &[[0, 1, 2], [0, 2, 3]],
    },
    // 7: all but top left
    CaseRow {
        points: &[TR, BR, BL, LC, TC],
        triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4]],
    },
    // 8: top left
    CaseRow {
        points: &[LC, TL, TC],
        triangles: &[[0, 1, 2]],
    },
    // 9: top half
    CaseRow {
        points: &[TR, RC, LC, TL],
        triangles: &[[0, 1, 2], [0, 2, 3]],
    },
    // 10: saddle, bottom right + top left joined through the center
    CaseRow {
        points: &[RC, BR, BC, LC, TL, TC],
        triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]],
    },
    // 11: all but bottom left
    CaseRow {
        points: &[TR, BR, BC, LC, TL],
        triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4]],
    },
    // 12: left half
    CaseRow {
        points: &[BC, BL, TL, TC],
        triangles: &[[0, 1, 2], [0, 2, 3]],
    },
    // 13: all but bottom right
    CaseRow {
        points: &[TR, RC, BC, BL, TL],
        triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4]],
    },
    // 14: all but top right
    CaseRow {
        points: &[RC, BR, BL, TL, TC],
        triangles: &[[0, 1, 2], [0, 2, 3], [0, 3, 4]],
    },
    // 15: everything above
    CaseRow {
        points: &[TR, BR, BL, TL],
        triangles: &[[0, 1, 2], [0, 2, 3]],
    },
];

static CORRECTED_CASE_1: CaseRow = CaseRow {
    points: &[TC, TR, RC],
    triangles: &[[0, 1, 2]],
};

/// Which triangle table drives emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseTable {
    /// Historical table. Configuration 1 emits a zero-area triangle.
    #[default]
    Reference,
    /// Configuration 1 covers the top right corner like the other single-corner cases.
    Corrected,
}

impl CaseTable {
    /// Look up the row for `configuration`.
    ///
    /// Panics if the mask is outside 0-15: that is a bug in the caller, not bad input.
    #[must_use]
    pub fn row(self, configuration: Configuration) -> &'static CaseRow {
        let index = configuration.index();
        assert!(
            index < CONFIGURATION_COUNT,
            "configuration {index} outside the 16-case table"
        );
        match (self, index) {
            (CaseTable::Corrected, 1) => &CORRECTED_CASE_1,
            _ => &REFERENCE_CASES[index],
        }
    }

    pub fn from_corrected(corrected: bool) -> Self {
        if corrected {
            CaseTable::Corrected
        } else {
            CaseTable::Reference
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLES: [CaseTable; 2] = [CaseTable::Reference, CaseTable::Corrected];

    fn rows(table: CaseTable) -> impl Iterator<Item = (Configuration, &'static CaseRow)> {
        (0..CONFIGURATION_COUNT as u8).map(move |c| (Configuration(c), table.row(Configuration(c))))
    }

    #[test]
    fn test_indices_stay_in_range() {
        for table in TABLES {
            for (config, row) in rows(table) {
                for tri in row.triangles {
                    for &i in tri {
                        assert!(
                            i >= 0 && (i as usize) < row.points.len(),
                            "{:?} config {}: index {} with {} points",
                            table,
                            config.0,
                            i,
                            row.points.len()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_rows_are_fans_from_first_point() {
        for table in TABLES {
            for (config, row) in rows(table) {
                if row.points.is_empty() {
                    assert!(row.triangles.is_empty());
                    continue;
                }
                assert_eq!(
                    row.points.len(),
                    row.triangles.len() + 2,
                    "config {} fan size",
                    config.0
                );
                for (n, tri) in row.triangles.iter().enumerate() {
                    let n = n as i32;
                    assert_eq!(*tri, [0, n + 1, n + 2], "config {} triangle {}", config.0, n);
                }
            }
        }
    }

    #[test]
    fn test_only_configuration_zero_is_empty() {
        for table in TABLES {
            for (config, row) in rows(table) {
                assert_eq!(row.points.is_empty(), config == Configuration::EMPTY);
            }
        }
    }

    #[test]
    fn test_row_corners_match_raised_corners() {
        for table in TABLES {
            for (config, row) in rows(table) {
                if table == CaseTable::Reference && config.0 == 1 {
                    continue;
                }
                for corner in Corner::ALL {
                    let used = row.points.contains(&CellPoint::Corner(corner));
                    assert_eq!(
                        used,
                        config.is_above(corner),
                        "{:?} config {} corner {:?}",
                        table,
                        config.0,
                        corner
                    );
                }
            }
        }
    }

    #[test]
    fn test_row_edges_match_crossed_edges() {
        for table in TABLES {
            for (config, row) in rows(table) {
                for edge in EdgePoint::ALL {
                    let (from, to) = edge.endpoints();
                    let crossed = config.is_above(from) != config.is_above(to);
                    let used = row.points.contains(&CellPoint::Edge(edge));
                    assert_eq!(used, crossed, "config {} edge {:?}", config.0, edge);
                }
            }
        }
    }

    #[test]
    fn test_reference_rows_match_table() {
        // Row 14 carries the top left corner its fan indices need
        let expected: [&[CellPoint]; CONFIGURATION_COUNT] = [
            &[],
            &[TC, RC, TC],
            &[RC, BR, BC],
            &[TR, BR, BC, TC],
            &[BC, BL, LC],
            &[TR, RC, BC, BL, LC, TC],
            &[BR, BL, LC, RC],
            &[TR, BR, BL, LC, TC],
            &[LC, TL, TC],
            &[TR, RC, LC, TL],
            &[RC, BR, BC, LC, TL, TC],
            &[TR, BR, BC, LC, TL],
            &[BC, BL, TL, TC],
            &[TR, RC, BC, BL, TL],
            &[RC, BR, BL, TL, TC],
            &[TR, BR, BL, TL],
        ];
        let expected_triangles: [usize; CONFIGURATION_COUNT] =
            [0, 1, 1, 2, 1, 4, 2, 3, 1, 2, 4, 3, 2, 3, 3, 2];

        for (c, points) in expected.iter().enumerate() {
            let row = CaseTable::Reference.row(Configuration(c as u8));
            assert_eq!(row.points, *points, "config {} vertex order", c);
            assert_eq!(
                row.triangles.len(),
                expected_triangles[c],
                "config {} triangle count",
                c
            );
        }
    }

    #[test]
    fn test_reference_case_one_is_literal() {
        let row = CaseTable::Reference.row(Configuration(1));
        assert_eq!(row.points, &[TC, RC, TC]);
        assert_eq!(row.triangles, &[[0, 1, 2]]);
    }

    #[test]
    fn test_corrected_case_one_covers_corner() {
        let row = CaseTable::Corrected.row(Configuration(1));
        assert_eq!(row.points, &[TC, TR, RC]);
        for c in 2..CONFIGURATION_COUNT as u8 {
            assert_eq!(
                CaseTable::Corrected.row(Configuration(c)),
                CaseTable::Reference.row(Configuration(c)),
            );
        }
    }

    #[test]
    fn test_case_fourteen_includes_top_left() {
        let row = CaseTable::Reference.row(Configuration(14));
        assert_eq!(row.points, &[RC, BR, BL, TL, TC]);
        assert_eq!(row.triangles.len(), 3);
    }

    #[test]
    fn test_saddles_use_fixed_hexagon() {
        assert_eq!(
            CaseTable::Reference.row(Configuration(5)).points,
            &[TR, RC, BC, BL, LC, TC]
        );
        assert_eq!(
            CaseTable::Reference.row(Configuration(10)).points,
            &[RC, BR, BC, LC, TL, TC]
        );
    }

    #[test]
    #[should_panic(expected = "outside the 16-case table")]
    fn test_out_of_range_configuration_panics() {
        let _ = CaseTable::Reference.row(Configuration(16));
    }

    #[test]
    fn test_from_corrected() {
        assert_eq!(CaseTable::from_corrected(false), CaseTable::Reference);
        assert_eq!(CaseTable::from_corrected(true), CaseTable::Corrected);
    }
}
