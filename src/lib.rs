use godot::prelude::*;

pub mod batch;
pub mod debug_log;
pub mod error;
pub mod marching_squares;
pub mod params;
mod square_node;

struct PixyMarchingSquaresExtension;

#[gdextension]
unsafe impl ExtensionLibrary for PixyMarchingSquaresExtension {}
