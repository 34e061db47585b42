use godot::prelude::*;

use crate::debug_log::init_debug_log;
use crate::error::SquareError;
use crate::marching_squares::{CaseTable, CellFragment, SampleValues, Square};

/// Single marching squares cell for GDScript - triangulates four corner samples
#[derive(GodotClass)]
#[class(base=RefCounted, init)]
pub struct PixyMarchingSquare {
    base: Base<RefCounted>,

    /// Center of the cell
    #[export]
    position: Vector2,

    /// Edge length of the cell in world units
    #[export]
    #[init(val = 1.0)]
    grid_scale: f32,

    /// Emit a real corner triangle for configuration 1 instead of the zero-area one
    #[export]
    #[init(val = false)]
    corrected_table: bool,

    fragment: CellFragment,
}

#[godot_api]
impl PixyMarchingSquare {
    /// Triangulate the cell. Returns the configuration (0-15), or -1 on bad input.
    #[func]
    fn triangulate(&mut self, iso_value: f32, values: PackedFloat32Array) -> i32 {
        let (mut square, samples) = match self.prepare(&values) {
            Ok(prepared) => prepared,
            Err(err) => {
                godot_error!("PixyMarchingSquare: triangulate failed: {}", err);
                self.fragment.clear();
                return -1;
            }
        };

        let configuration = square.configuration(iso_value, &samples);
        self.fragment = square.triangulate(iso_value, &samples);
        configuration.0 as i32
    }

    /// Classify samples without emitting geometry. Returns -1 on bad input.
    #[func]
    fn get_configuration(&self, iso_value: f32, values: PackedFloat32Array) -> i32 {
        match self.prepare(&values) {
            Ok((square, samples)) => square.configuration(iso_value, &samples).0 as i32,
            Err(err) => {
                godot_error!("PixyMarchingSquare: get_configuration failed: {}", err);
                -1
            }
        }
    }

    /// Vertices from the last triangulate call (z = 0)
    #[func]
    fn get_vertices(&self) -> PackedVector3Array {
        PackedVector3Array::from(self.fragment.vertices.as_slice())
    }

    /// Triangle indices from the last triangulate call
    #[func]
    fn get_triangles(&self) -> PackedInt32Array {
        PackedInt32Array::from(self.fragment.triangles.as_slice())
    }

    /// Start writing diagnostics to debug_marching_squares.log
    #[func]
    fn enable_debug_log(&self) {
        init_debug_log();
        godot_print!("PixyMarchingSquare: debug log enabled");
    }

    fn prepare(&self, values: &PackedFloat32Array) -> Result<(Square, SampleValues), SquareError> {
        let square = Square::new(self.position, self.grid_scale)?
            .with_case_table(CaseTable::from_corrected(self.corrected_table));
        let samples = SampleValues::try_from(values.as_slice())?;
        Ok((square, samples))
    }
}
