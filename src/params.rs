/// Shared triangulation parameters used by the Godot class and batch triangulation.
use crate::marching_squares::CaseTable;

#[derive(Clone, Debug)]
pub struct SquareParams {
    /// Edge length of every cell
    pub grid_scale: f32,
    /// Samples strictly above this value are inside
    pub iso_value: f32,
    pub case_table: CaseTable,
}

impl Default for SquareParams {
    fn default() -> Self {
        Self {
            grid_scale: 1.0,
            iso_value: 0.5,
            case_table: CaseTable::Reference,
        }
    }
}
