//! A complete frame handed to the display compositor.

use super::RenderPass;

/// Render passes of one frame, ordered so that every pass comes before the
/// passes that embed it. The last pass is the root.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct AggregatedFrame {
    pub render_pass_list: Vec<RenderPass>,
}

impl AggregatedFrame {
    /// Create a frame from its passes.
    #[inline]
    #[must_use]
    pub const fn new(render_pass_list: Vec<RenderPass>) -> Self {
        Self { render_pass_list }
    }

    /// Total number of quads across every pass.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.render_pass_list.iter().map(|pass| pass.quads.len()).sum()
    }
}
