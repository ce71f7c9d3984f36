//! Frame representation consumed by the occlusion culler.
//!
//! A frame is a list of render passes. Each pass owns an arena of shared quad
//! states and an ordered list of draw quads referring to them by index. The
//! first quad of a pass is drawn on top.

mod draw_quad;
mod filters;
mod frame;
mod render_pass;
mod shared_quad_state;

pub use draw_quad::*;
pub use filters::*;
pub use frame::*;
pub use render_pass::*;
pub use shared_quad_state::*;
