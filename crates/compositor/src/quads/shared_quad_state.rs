//! State shared by a run of quads.

use crate::geometry::{RRectF, Rect, Transform};

/// Index of a [`SharedQuadState`] within its render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SharedQuadStateId(pub usize);

/// How a quad is composited with what lies beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BlendMode {
    Clear,
    /// Replace the destination.
    Src,
    Dst,
    /// Normal alpha blending.
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
    Plus,
    Modulate,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// Mask applied to every quad of a shared quad state.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct MaskFilterInfo {
    /// Rounded clip in target space.
    pub rounded_corner_bounds: RRectF,
}

impl MaskFilterInfo {
    /// Create a rounded-corner mask.
    #[must_use]
    pub const fn new(rounded_corner_bounds: RRectF) -> Self {
        Self {
            rounded_corner_bounds,
        }
    }

    /// Check if the mask rounds any corner.
    #[must_use]
    pub fn has_rounded_corners(&self) -> bool {
        !self.rounded_corner_bounds.is_empty() && self.rounded_corner_bounds.has_rounded_corners()
    }
}

/// Properties shared by consecutive quads of a render pass.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SharedQuadState {
    /// Maps quad content space into the pass's target space.
    pub quad_to_target_transform: Transform,
    /// Visible part of the layer that produced the quads, in content space.
    pub visible_quad_layer_rect: Rect,
    /// Rounded-corner mask, if any.
    pub mask_filter_info: Option<MaskFilterInfo>,
    /// Clip in target space, if any.
    pub clip_rect: Option<Rect>,
    /// Whether every pixel of the quads' content is opaque.
    pub are_contents_opaque: bool,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
    pub blend_mode: BlendMode,
    /// Non-zero for quads inside a 3D rendering context.
    pub sorting_context_id: u32,
}

impl SharedQuadState {
    /// Opaque, unclipped state whose visible layer is `visible_quad_layer_rect`.
    #[must_use]
    pub const fn new(quad_to_target_transform: Transform, visible_quad_layer_rect: Rect) -> Self {
        Self {
            quad_to_target_transform,
            visible_quad_layer_rect,
            mask_filter_info: None,
            clip_rect: None,
            are_contents_opaque: true,
            opacity: 1.0,
            blend_mode: BlendMode::SrcOver,
            sorting_context_id: 0,
        }
    }

    /// Check if the quads sit inside a 3D rendering context.
    #[must_use]
    pub const fn is_in_3d_context(&self) -> bool {
        self.sorting_context_id != 0
    }
}
