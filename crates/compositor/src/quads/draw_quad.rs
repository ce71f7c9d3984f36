//! Draw quads and their materials.

use super::{RenderPassId, ResourceId, SharedQuadStateId};
use crate::geometry::Rect;

/// What a quad draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Material {
    /// Flat color fill.
    SolidColor,
    /// A texture backed by a display resource.
    TextureContent { resource_id: ResourceId },
    /// A tile of rasterized content.
    TiledContent,
    /// Recorded picture content.
    PictureContent,
    /// Planar video frame.
    YuvVideoContent,
    /// Placeholder for a shared element transition.
    SharedElement,
    /// Debug border outline.
    DebugBorder,
    /// Punches a hole for an underlay video plane.
    VideoHole,
    /// Embeds the output of another pass of the same frame.
    AggregatedRenderPass {
        render_pass_id: RenderPassId,
        resource_id: ResourceId,
    },
    /// Embeds a pass that has not been aggregated yet.
    CompositorRenderPass { render_pass_id: RenderPassId },
}

impl Material {
    /// The embedded pass, for render pass materials.
    #[must_use]
    pub const fn render_pass_id(&self) -> Option<RenderPassId> {
        match *self {
            Self::AggregatedRenderPass { render_pass_id, .. }
            | Self::CompositorRenderPass { render_pass_id } => Some(render_pass_id),
            Self::SolidColor
            | Self::TextureContent { .. }
            | Self::TiledContent
            | Self::PictureContent
            | Self::YuvVideoContent
            | Self::SharedElement
            | Self::DebugBorder
            | Self::VideoHole => None,
        }
    }
}

/// A single quad in a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrawQuad {
    pub material: Material,
    /// Full quad bounds in content space.
    pub rect: Rect,
    /// Part of `rect` that still needs drawing.
    pub visible_rect: Rect,
    /// Index of the quad's state in its pass.
    pub shared_quad_state: SharedQuadStateId,
}

impl DrawQuad {
    /// Create a fully visible quad.
    #[must_use]
    pub const fn new(material: Material, rect: Rect, shared_quad_state: SharedQuadStateId) -> Self {
        Self {
            material,
            rect,
            visible_rect: rect,
            shared_quad_state,
        }
    }

    /// Solid color quad covering `rect`.
    #[must_use]
    pub const fn solid_color(rect: Rect, shared_quad_state: SharedQuadStateId) -> Self {
        Self::new(Material::SolidColor, rect, shared_quad_state)
    }

    /// Replace the visible part of the quad.
    #[must_use]
    pub const fn with_visible_rect(mut self, visible_rect: Rect) -> Self {
        self.visible_rect = visible_rect;
        self
    }
}
