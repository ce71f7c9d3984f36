//! Overdraw removal for aggregated frames.
//!
//! Within each render pass, quads are visited front to back. Whenever the walk
//! leaves a run of quads sharing one [`SharedQuadState`], the run's opaque
//! area is folded into a target-space occlusion region. Quads of later runs
//! are then shrunk, split or emptied where that region covers them.
//!
//! Occlusion is computed per pass and never crosses pass boundaries. The only
//! cross-pass input is the set of target-space rectangles whose pixels feed a
//! pixel-moving backdrop filter: fragments touching those are never split,
//! because the filter would sample the gaps.

mod rounded_corners;
mod settings;
mod split;
mod stats;

pub use settings::*;
pub use stats::*;

use crate::geometry::{Rect, Transform};
use crate::overlay::{OverlayProcessor, ResourceProvider};
use crate::quads::{
    AggregatedFrame, BlendMode, Material, RenderPass, RenderPassId, SharedQuadState,
    SharedQuadStateId,
};
use crate::region::Region;
use log::{debug, trace};
use rounded_corners::occluding_rects;
use split::{can_split_quad, reduce_complexity};
use std::collections::HashMap;
use tracing::info_span;

/// Removes pixels that later passes of the renderer would overdraw.
#[derive(Debug)]
pub struct OcclusionCuller {
    settings: CullerSettings,
    overlay_processor: Box<dyn OverlayProcessor>,
    device_scale_factor: f32,
}

/// Occlusion state of the pass being culled.
#[derive(Default)]
struct PassState {
    /// Opaque area of the runs folded so far, in target space.
    occlusion_in_target_space: Region,
    /// Target-space area feeding pixel-moving backdrop filters.
    backdrop_filters_in_target_space: Region,
    /// `occlusion_in_target_space` mapped into the current run's content space.
    occlusion_in_content_space: Region,
    /// Backdrop filter area mapped into the current run's content space.
    render_pass_quads_in_content_space: Rect,
    /// State of the current run.
    current: Option<SharedQuadStateId>,
    /// Transform of the current run.
    current_transform: Transform,
    /// Whether the current run can be occluded at all.
    current_intersects_occlusion: bool,
}

impl OcclusionCuller {
    /// Create a culler for a display with a device scale factor of 1.
    #[must_use]
    pub fn new(settings: CullerSettings, overlay_processor: Box<dyn OverlayProcessor>) -> Self {
        Self {
            settings: settings.sanitized(),
            overlay_processor,
            device_scale_factor: 1.0,
        }
    }

    /// Settings in use.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &CullerSettings {
        &self.settings
    }

    /// Current device scale factor.
    #[inline]
    #[must_use]
    pub const fn device_scale_factor(&self) -> f32 {
        self.device_scale_factor
    }

    /// Record the display's device scale factor, used to convert the split
    /// threshold from DIP² to physical pixels.
    pub fn update_device_scale_factor(&mut self, device_scale_factor: f32) {
        if (self.device_scale_factor - device_scale_factor).abs() <= f32::EPSILON {
            return;
        }
        debug!(
            target: "occlusion",
            "device scale factor {} -> {}", self.device_scale_factor, device_scale_factor
        );
        self.device_scale_factor = device_scale_factor;
    }

    /// Shrink, split or empty every quad of `frame` hidden behind opaque
    /// content of the same render pass.
    ///
    /// Only `visible_rect`s change, and splitting inserts quads in place of
    /// the quad they replace. Passes with filters and passes with a single
    /// quad are left alone.
    pub fn remove_overdraw_quads(
        &self,
        frame: &mut AggregatedFrame,
        resource_provider: &dyn ResourceProvider,
    ) -> CullingStats {
        let mut stats = CullingStats::new();
        if frame.render_pass_list.is_empty() {
            return stats;
        }
        let _span = info_span!("compositor.remove_overdraw_quads").entered();

        let backdrop_filter_rects: HashMap<RenderPassId, Rect> = frame
            .render_pass_list
            .iter()
            .filter(|pass| pass.backdrop_filters.has_filter_that_moves_pixels())
            .map(|pass| {
                let rect = pass
                    .transform_to_root_target
                    .map_enclosing_clipped_rect(pass.output_rect);
                (pass.id, rect)
            })
            .collect();

        for pass in &mut frame.render_pass_list {
            if pass.has_filters() || pass.quads.len() <= 1 {
                trace!(
                    target: "occlusion",
                    "skipping pass {:?}: {} quads, filters: {}",
                    pass.id,
                    pass.quads.len(),
                    pass.has_filters()
                );
                stats.passes_skipped += 1;
                continue;
            }
            stats.passes_culled += 1;
            self.cull_pass(pass, &backdrop_filter_rects, resource_provider, &mut stats);
        }

        debug!(target: "occlusion", "remove_overdraw_quads: {stats}");
        stats
    }

    fn cull_pass(
        &self,
        pass: &mut RenderPass,
        backdrop_filter_rects: &HashMap<RenderPassId, Rect>,
        resource_provider: &dyn ResourceProvider,
        stats: &mut CullingStats,
    ) {
        let mut state = PassState::default();
        let mut index = 0;
        while let Some(&quad) = pass.quads.get(index) {
            if let Some(render_pass_id) = quad.material.render_pass_id() {
                if let Some(&rect) = backdrop_filter_rects.get(&render_pass_id) {
                    state.backdrop_filters_in_target_space.union_rect(rect);
                }
                index += 1;
                continue;
            }
            let Some(sqs) = pass.shared_quad_state(quad.shared_quad_state) else {
                index += 1;
                continue;
            };
            if sqs.is_in_3d_context() {
                index += 1;
                continue;
            }

            if state.current != Some(quad.shared_quad_state) {
                if let Some(previous) = state.current.and_then(|id| pass.shared_quad_state(id)) {
                    self.fold_occlusion(previous, &mut state.occlusion_in_target_space);
                }
                Self::enter_shared_quad_state(&mut state, quad.shared_quad_state, sqs);
            }

            let visible_rect = quad.visible_rect;
            if !state.current_intersects_occlusion || visible_rect.is_empty() {
                index += 1;
                continue;
            }

            if state.occlusion_in_content_space.contains_rect(visible_rect) {
                Self::set_visible_rect(pass, index, visible_rect.with_empty_size());
                stats.record_removed(visible_rect.area());
            } else if state.occlusion_in_content_space.intersects_rect(visible_rect) {
                let mut remainder = Region::from(visible_rect);
                remainder.subtract(&state.occlusion_in_content_space);
                let bounds = remainder.bounds();

                if let Some(fragments) =
                    self.split_fragments(&quad.material, &remainder, &state, resource_provider)
                {
                    let kept: u64 = fragments.iter().copied().map(Rect::area).sum();
                    let inserted = pass.split_quad(index, &fragments);
                    trace!(
                        target: "occlusion",
                        "split quad {index} of pass {:?} into {inserted} fragments",
                        pass.id
                    );
                    stats.record_split(inserted, visible_rect.area().saturating_sub(kept));
                    index += inserted;
                    continue;
                }
                if bounds != visible_rect {
                    Self::set_visible_rect(pass, index, bounds);
                    stats.record_shrunk(visible_rect.area().saturating_sub(bounds.area()));
                }
            } else if state.occlusion_in_content_space.is_empty()
                && state.occlusion_in_target_space.contains_rect(
                    state
                        .current_transform
                        .map_enclosing_clipped_rect(visible_rect),
                )
            {
                Self::set_visible_rect(pass, index, visible_rect.with_empty_size());
                stats.record_removed(visible_rect.area());
            }
            index += 1;
        }
    }

    /// Reset the per-run state for a new run of quads sharing `sqs`.
    fn enter_shared_quad_state(
        state: &mut PassState,
        id: SharedQuadStateId,
        sqs: &SharedQuadState,
    ) {
        state.current = Some(id);
        state.current_transform = sqs.quad_to_target_transform;
        state.occlusion_in_content_space.clear();
        state.render_pass_quads_in_content_space = Rect::default();

        let transform = &sqs.quad_to_target_transform;
        let mut bounds_in_target =
            transform.map_enclosing_clipped_rect(sqs.visible_quad_layer_rect);
        if let Some(clip) = sqs.clip_rect {
            bounds_in_target = bounds_in_target.intersect(clip);
        }
        state.current_intersects_occlusion = state
            .occlusion_in_target_space
            .intersects_rect(bounds_in_target);
        if !state.current_intersects_occlusion
            || !transform.non_degenerate_preserves_2d_axis_alignment()
        {
            return;
        }
        let Some(reverse) = transform.inverse() else {
            return;
        };

        for rect in state
            .occlusion_in_target_space
            .rects()
            .filter(|rect| rect.intersects(bounds_in_target))
        {
            state
                .occlusion_in_content_space
                .union_rect(reverse.map_enclosed_rect(rect).clamped_for_region());
        }

        if bounds_in_target.intersects(state.backdrop_filters_in_target_space.bounds()) {
            for rect in state.backdrop_filters_in_target_space.rects() {
                state.render_pass_quads_in_content_space = state
                    .render_pass_quads_in_content_space
                    .union(reverse.map_enclosing_clipped_rect(rect));
            }
        }
    }

    /// Add the opaque area of `sqs` to `occlusion`, then cap the region's
    /// complexity by dropping its smallest rectangles.
    fn fold_occlusion(&self, sqs: &SharedQuadState, occlusion: &mut Region) {
        if !can_contribute_to_occlusion(sqs) {
            return;
        }
        let visible_in_target = sqs
            .quad_to_target_transform
            .map_enclosed_rect(sqs.visible_quad_layer_rect);
        let shapes: Vec<Rect> = sqs
            .mask_filter_info
            .filter(|mask| !mask.rounded_corner_bounds.is_empty())
            .map_or_else(
                || vec![visible_in_target],
                |mask| {
                    occluding_rects(&mask, &self.settings)
                        .into_iter()
                        .map(|rect| visible_in_target.intersect(rect))
                        .collect()
                },
            );

        for shape in shapes {
            let clipped = sqs.clip_rect.map_or(shape, |clip| shape.intersect(clip));
            if clipped.area() < self.settings.occluder_minimum_visible_quad_size {
                continue;
            }
            occlusion.union_rect(clipped.clamped_for_region());
        }

        while occlusion.complexity() > self.settings.maximum_occluder_complexity {
            let Some(smallest) = occlusion
                .rects()
                .min_by_key(|rect| rect.checked_area().unwrap_or(i32::MAX))
            else {
                break;
            };
            occlusion.subtract_rect(smallest);
        }
    }

    /// Fragments to replace a partially occluded quad with, or `None` if the
    /// quad should only be shrunk.
    fn split_fragments(
        &self,
        material: &Material,
        remainder: &Region,
        state: &PassState,
        resource_provider: &dyn ResourceProvider,
    ) -> Option<Vec<Rect>> {
        if self.overlay_processor.disable_splitting_quads()
            || remainder.intersects_rect(state.render_pass_quads_in_content_space)
        {
            return None;
        }
        let fragments = reduce_complexity(remainder, self.settings.quad_split_limit)?;
        can_split_quad(
            material,
            &fragments,
            remainder.bounds(),
            self.settings.minimum_fragments_reduced,
            self.device_scale_factor,
            resource_provider,
        )
        .then_some(fragments)
    }

    fn set_visible_rect(pass: &mut RenderPass, index: usize, visible_rect: Rect) {
        if let Some(quad) = pass.quads.get_mut(index) {
            quad.visible_rect = visible_rect;
        }
    }
}

/// Check if quads of `sqs` hide everything beneath them.
fn can_contribute_to_occlusion(sqs: &SharedQuadState) -> bool {
    sqs.opacity >= 1.0
        && sqs.are_contents_opaque
        && matches!(sqs.blend_mode, BlendMode::SrcOver | BlendMode::Src)
        && sqs
            .quad_to_target_transform
            .non_degenerate_preserves_2d_axis_alignment()
}
