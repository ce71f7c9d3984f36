//! Geometry primitives used by the compositor.
//!
//! Integer rectangles describe quad content and target-space pixels, float
//! rectangles and rounded rectangles describe mask bounds, and [`Transform`]
//! maps between the two spaces.

mod rect;
mod rrect;
mod transform;

pub use rect::*;
pub use rrect::*;
pub use transform::*;
