//! Statistics reported by a culling call.

use core::fmt;

/// What one call to
/// [`remove_overdraw_quads`](super::OcclusionCuller::remove_overdraw_quads)
/// changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullingStats {
    /// Render passes whose quads were tested against occlusion.
    pub passes_culled: usize,
    /// Render passes skipped because of filters or too few quads.
    pub passes_skipped: usize,
    /// Quads reduced to an empty visible rect.
    pub quads_removed: usize,
    /// Quads whose visible rect was shrunk to the unoccluded bounds.
    pub quads_shrunk: usize,
    /// Quads replaced by several fragments.
    pub quads_split: usize,
    /// Quads inserted by splitting, counting every fragment.
    pub fragments_created: usize,
    /// Pixels that no longer need drawing.
    pub area_saved_px: u64,
}

impl CullingStats {
    /// Create empty statistics.
    #[inline]
    pub const fn new() -> Self {
        Self {
            passes_culled: 0,
            passes_skipped: 0,
            quads_removed: 0,
            quads_shrunk: 0,
            quads_split: 0,
            fragments_created: 0,
            area_saved_px: 0,
        }
    }

    /// Check if no quad was changed.
    #[inline]
    pub const fn is_noop(&self) -> bool {
        self.quads_removed == 0 && self.quads_shrunk == 0 && self.quads_split == 0
    }

    pub(crate) const fn record_removed(&mut self, area: u64) {
        self.quads_removed += 1;
        self.area_saved_px = self.area_saved_px.saturating_add(area);
    }

    pub(crate) const fn record_shrunk(&mut self, area: u64) {
        self.quads_shrunk += 1;
        self.area_saved_px = self.area_saved_px.saturating_add(area);
    }

    pub(crate) const fn record_split(&mut self, fragments: usize, area: u64) {
        self.quads_split += 1;
        self.fragments_created += fragments;
        self.area_saved_px = self.area_saved_px.saturating_add(area);
    }
}

impl fmt::Display for CullingStats {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} passes culled, {} skipped; ",
            self.passes_culled, self.passes_skipped
        )?;
        write!(
            formatter,
            "{} quads removed, {} shrunk, {} split into {} fragments; {} px saved",
            self.quads_removed,
            self.quads_shrunk,
            self.quads_split,
            self.fragments_created,
            self.area_saved_px
        )
    }
}
