// Marching squares: classify a cell, interpolate edge crossings, emit the case fan
mod cases;
mod interpolation;
mod square;
mod types;
mod validator;

pub use cases::*;
pub use interpolation::*;
pub use square::*;
pub use types::*;
pub use validator::*;
