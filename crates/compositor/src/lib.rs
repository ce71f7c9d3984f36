//! Occlusion culling for a display compositor.
//!
//! Given an [`AggregatedFrame`], the [`OcclusionCuller`] finds the area of
//! each render pass already covered by opaque content and shrinks, splits or
//! empties the quads beneath it, so the renderer never shades pixels that end
//! up hidden.
#![allow(
    clippy::redundant_pub_crate,
    reason = "crate-internal helpers live in private modules and are marked pub(crate) explicitly"
)]

pub mod geometry;
pub mod occlusion;
pub mod overlay;
pub mod quads;
pub mod region;

pub use geometry::{Corner, CornerRadius, RRectF, Rect, RectF, Transform};
pub use occlusion::{
    CullerSettings, CullingStats, OcclusionCuller, ROUNDED_CORNER_INSET_COEFFICIENT,
};
pub use overlay::{
    DefaultOverlayProcessor, NoOverlayCandidates, OverlayCandidateSet, OverlayProcessor,
    ResourceProvider,
};
pub use quads::{
    AggregatedFrame, BlendMode, DrawQuad, FilterOperation, FilterOperations, MaskFilterInfo,
    Material, RenderPass, RenderPassId, ResourceId, SharedQuadState, SharedQuadStateId,
};
pub use region::Region;
