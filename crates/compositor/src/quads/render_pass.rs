//! Render passes and the identifiers they are addressed by.

use super::{DrawQuad, FilterOperations, SharedQuadState, SharedQuadStateId};
use crate::geometry::{Rect, Transform};

/// Unique identifier for a render pass within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RenderPassId(pub u64);

/// Identifier of a display resource (texture) owned by the resource provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ResourceId(pub u32);

/// A list of quads drawn into one target.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderPass {
    pub id: RenderPassId,
    /// Bounds of the pass's output in its own target space.
    pub output_rect: Rect,
    /// Maps the pass's target space into the root target.
    pub transform_to_root_target: Transform,
    /// Effects applied to the pass's own output.
    pub filters: FilterOperations,
    /// Effects applied to whatever lies beneath the pass.
    pub backdrop_filters: FilterOperations,
    /// Arena of states referenced by `quads`.
    pub shared_quad_states: Vec<SharedQuadState>,
    /// Quads ordered front to back.
    pub quads: Vec<DrawQuad>,
}

impl RenderPass {
    /// Create an empty, unfiltered pass.
    #[must_use]
    pub const fn new(id: RenderPassId, output_rect: Rect) -> Self {
        Self {
            id,
            output_rect,
            transform_to_root_target: Transform::identity(),
            filters: FilterOperations::new(),
            backdrop_filters: FilterOperations::new(),
            shared_quad_states: Vec::new(),
            quads: Vec::new(),
        }
    }

    /// Add a shared quad state and return its index.
    pub fn push_shared_quad_state(&mut self, state: SharedQuadState) -> SharedQuadStateId {
        self.shared_quad_states.push(state);
        SharedQuadStateId(self.shared_quad_states.len() - 1)
    }

    /// Append a quad behind every quad already in the pass.
    pub fn push_quad(&mut self, quad: DrawQuad) {
        self.quads.push(quad);
    }

    /// Look up the state a quad refers to.
    #[inline]
    #[must_use]
    pub fn shared_quad_state(&self, id: SharedQuadStateId) -> Option<&SharedQuadState> {
        self.shared_quad_states.get(id.0)
    }

    /// Check if the pass applies any filter or backdrop filter.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty() || !self.backdrop_filters.is_empty()
    }

    /// Replace the quad at `index` with one copy per rectangle of `fragments`,
    /// each copy keeping the original `rect` but drawing only its fragment.
    /// Returns the number of quads inserted.
    pub(crate) fn split_quad(&mut self, index: usize, fragments: &[Rect]) -> usize {
        let Some(&original) = self.quads.get(index) else {
            return 0;
        };
        let copies = fragments.iter().map(|&fragment| original.with_visible_rect(fragment));
        self.quads.splice(index..=index, copies);
        fragments.len()
    }
}
