//! End-to-end behaviour of `OcclusionCuller::remove_overdraw_quads`.
//!
//! Every frame here is built front to back: the first group of quads in a
//! pass sits on top of the groups that follow it.

use compositor::{
    AggregatedFrame, BlendMode, CullerSettings, DefaultOverlayProcessor, DrawQuad, FilterOperation,
    MaskFilterInfo, Material, NoOverlayCandidates, OcclusionCuller, OverlayCandidateSet, RRectF,
    Rect, RectF, Region, RenderPass, RenderPassId, ResourceId, SharedQuadState, SharedQuadStateId,
    Transform,
};

fn init_logging() {
    drop(env_logger::builder().is_test(true).try_init());
}

fn culler() -> OcclusionCuller {
    OcclusionCuller::new(
        CullerSettings::default(),
        Box::new(DefaultOverlayProcessor::new()),
    )
}

fn culler_with(settings: CullerSettings) -> OcclusionCuller {
    OcclusionCuller::new(settings, Box::new(DefaultOverlayProcessor::new()))
}

/// Opaque, untransformed state covering `layer`.
fn opaque(layer: Rect) -> SharedQuadState {
    SharedQuadState::new(Transform::identity(), layer)
}

/// Append `state` and one solid color quad per rect.
fn add_group(pass: &mut RenderPass, state: SharedQuadState, rects: &[Rect]) -> SharedQuadStateId {
    let id = pass.push_shared_quad_state(state);
    for &rect in rects {
        pass.push_quad(DrawQuad::solid_color(rect, id));
    }
    id
}

fn root_pass() -> RenderPass {
    RenderPass::new(RenderPassId(1), Rect::new(0, 0, 1000, 1000))
}

/// Pixels drawn by `quads`, as a region.
fn drawn_region(quads: &[DrawQuad]) -> Region {
    let mut region = Region::new();
    for quad in quads {
        region.union_rect(quad.visible_rect);
    }
    region
}

/// A 400x400 quad behind a 200x200 occluder centred on it.
fn ring_frame() -> AggregatedFrame {
    let mut pass = root_pass();
    let hole = Rect::new(100, 100, 200, 200);
    add_group(&mut pass, opaque(hole), &[hole]);
    let back = Rect::new(0, 0, 400, 400);
    add_group(&mut pass, opaque(back), &[back]);
    AggregatedFrame::new(vec![pass])
}

#[cfg(test)]
mod no_op_tests {
    use super::*;

    /// Test that an empty frame and single-quad passes are left alone.
    ///
    /// # Panics
    /// Panics if anything changes.
    #[test]
    fn trivial_frames() {
        init_logging();
        let mut empty = AggregatedFrame::default();
        let stats = culler().remove_overdraw_quads(&mut empty, &NoOverlayCandidates);
        assert_eq!(stats, compositor::CullingStats::default());

        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 100, 100)), &[Rect::new(0, 0, 100, 100)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
        assert_eq!(stats.passes_skipped, 1);
        assert!(stats.is_noop());
    }

    /// Test that passes with filters or backdrop filters are left alone.
    ///
    /// # Panics
    /// Panics if a filtered pass is modified.
    #[test]
    fn filtered_passes() {
        init_logging();
        let mut frame = ring_frame();
        frame.render_pass_list[0]
            .filters
            .push(FilterOperation::Opacity(0.5));
        let before = frame.clone();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);

        let mut frame = ring_frame();
        frame.render_pass_list[0]
            .backdrop_filters
            .push(FilterOperation::Grayscale(1.0));
        let before = frame.clone();
        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
        assert_eq!(stats.passes_culled, 0);
    }
}

#[cfg(test)]
mod occlusion_tests {
    use super::*;

    /// Test that a quad entirely behind an opaque quad is emptied.
    ///
    /// # Panics
    /// Panics if the hidden quad keeps any visible area.
    #[test]
    fn full_coverage_empties_quad() {
        init_logging();
        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 100, 100)), &[Rect::new(0, 0, 100, 100)]);
        add_group(&mut pass, opaque(Rect::new(10, 10, 50, 50)), &[Rect::new(10, 10, 50, 50)]);
        let mut frame = AggregatedFrame::new(vec![pass]);

        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert!(quads[1].visible_rect.is_empty());
        assert_eq!(quads[1].rect, Rect::new(10, 10, 50, 50));
        assert_eq!(quads[0].visible_rect, Rect::new(0, 0, 100, 100));
        assert_eq!(stats.quads_removed, 1);
        assert_eq!(stats.area_saved_px, 2500);
    }

    /// Test that the quad in front is never occluded by the quad behind it.
    ///
    /// # Panics
    /// Panics if the front quad changes.
    #[test]
    fn back_quads_do_not_occlude() {
        init_logging();
        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(10, 10, 50, 50)), &[Rect::new(10, 10, 50, 50)]);
        add_group(&mut pass, opaque(Rect::new(0, 0, 100, 100)), &[Rect::new(0, 0, 100, 100)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }

    /// Test that a partially hidden quad shrinks to exactly its visible part.
    ///
    /// # Panics
    /// Panics if the remaining area differs from the set difference.
    #[test]
    fn partial_overlap_shrinks() {
        init_logging();
        let mut pass = root_pass();
        let front = Rect::new(0, 0, 100, 100);
        let back = Rect::new(50, 0, 100, 100);
        add_group(&mut pass, opaque(front), &[front]);
        add_group(&mut pass, opaque(back), &[back]);
        let mut frame = AggregatedFrame::new(vec![pass]);

        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[1].visible_rect, Rect::new(100, 0, 50, 100));

        let mut expected = Region::from(back);
        expected.subtract_rect(front);
        assert_eq!(Region::from(quads[1].visible_rect), expected);
        assert_eq!(stats.quads_shrunk, 1);
        assert_eq!(stats.area_saved_px, 5000);
    }

    /// Test that a quad with a large hole is split into the ring around it.
    ///
    /// # Panics
    /// Panics if the fragments do not recreate the set difference.
    #[test]
    fn partial_overlap_splits() {
        init_logging();
        let mut frame = ring_frame();
        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);

        let quads = &frame.render_pass_list[0].quads;
        assert_eq!(quads.len(), 5);
        let fragments = &quads[1..];
        assert!(fragments.iter().all(|quad| quad.rect == Rect::new(0, 0, 400, 400)));

        let mut expected = Region::from(Rect::new(0, 0, 400, 400));
        expected.subtract_rect(Rect::new(100, 100, 200, 200));
        assert_eq!(drawn_region(fragments), expected);
        let total: u64 = fragments.iter().map(|quad| quad.visible_rect.area()).sum();
        assert_eq!(total, 120_000);

        assert_eq!(stats.quads_split, 1);
        assert_eq!(stats.fragments_created, 4);
        assert_eq!(stats.area_saved_px, 40_000);
    }

    /// Test that a split that saves too little only shrinks the quad, and
    /// that the device scale factor can tip it over the threshold.
    ///
    /// # Panics
    /// Panics if the threshold is not applied in physical pixels.
    #[test]
    fn split_threshold_scales_with_device() {
        init_logging();
        let build = || {
            let mut pass = root_pass();
            let hole = Rect::new(100, 100, 100, 100);
            add_group(&mut pass, opaque(hole), &[hole]);
            let back = Rect::new(0, 0, 300, 300);
            add_group(&mut pass, opaque(back), &[back]);
            AggregatedFrame::new(vec![pass])
        };

        let mut frame = build();
        let mut culler = culler();
        let stats = culler.remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame.render_pass_list[0].quads.len(), 2);
        assert!(stats.is_noop());

        culler.update_device_scale_factor(2.0);
        assert!((culler.device_scale_factor() - 2.0).abs() < f32::EPSILON);
        let mut frame = build();
        let stats = culler.remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame.render_pass_list[0].quads.len(), 5);
        assert_eq!(stats.fragments_created, 4);
    }

    /// Test that running the culler on its own output changes nothing.
    ///
    /// # Panics
    /// Panics if the second run modifies the frame.
    #[test]
    fn idempotent() {
        init_logging();
        let mut pass = root_pass();
        let centre = Rect::new(100, 100, 200, 200);
        add_group(&mut pass, opaque(centre), &[centre]);
        add_group(&mut pass, opaque(Rect::new(0, 0, 400, 400)), &[Rect::new(0, 0, 400, 400)]);
        add_group(&mut pass, opaque(Rect::new(350, 0, 100, 100)), &[Rect::new(350, 0, 100, 100)]);
        add_group(&mut pass, opaque(Rect::new(120, 120, 20, 20)), &[Rect::new(120, 120, 20, 20)]);
        let mut frame = AggregatedFrame::new(vec![pass]);

        let first = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert!(!first.is_noop());
        let after_first = frame.clone();
        let second = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, after_first);
        assert!(second.is_noop());
    }

    /// Test that clip rects limit what an occluder hides.
    ///
    /// # Panics
    /// Panics if the clipped-away part still occludes.
    #[test]
    fn clip_limits_occluder() {
        init_logging();
        let mut pass = root_pass();
        let mut front = opaque(Rect::new(0, 0, 100, 100));
        front.clip_rect = Some(Rect::new(0, 0, 50, 100));
        add_group(&mut pass, front, &[Rect::new(0, 0, 100, 100)]);
        add_group(&mut pass, opaque(Rect::new(0, 0, 100, 100)), &[Rect::new(0, 0, 100, 100)]);
        let mut frame = AggregatedFrame::new(vec![pass]);

        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(
            frame.render_pass_list[0].quads[1].visible_rect,
            Rect::new(50, 0, 50, 100)
        );
    }

    /// Test that translucent or non-normal blending never occludes.
    ///
    /// # Panics
    /// Panics if a translucent quad hides what is behind it.
    #[test]
    fn translucent_does_not_occlude() {
        init_logging();
        let variants: [fn(&mut SharedQuadState); 3] = [
            |state| state.opacity = 0.5,
            |state| state.are_contents_opaque = false,
            |state| state.blend_mode = BlendMode::Multiply,
        ];
        for make_translucent in variants {
            let mut pass = root_pass();
            let mut front = opaque(Rect::new(0, 0, 100, 100));
            make_translucent(&mut front);
            add_group(&mut pass, front, &[Rect::new(0, 0, 100, 100)]);
            add_group(&mut pass, opaque(Rect::new(10, 10, 10, 10)), &[Rect::new(10, 10, 10, 10)]);
            let mut frame = AggregatedFrame::new(vec![pass]);
            let before = frame.clone();
            culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
            assert_eq!(frame, before);
        }

        let mut pass = root_pass();
        let mut front = opaque(Rect::new(0, 0, 100, 100));
        front.blend_mode = BlendMode::Src;
        add_group(&mut pass, front, &[Rect::new(0, 0, 100, 100)]);
        add_group(&mut pass, opaque(Rect::new(10, 10, 10, 10)), &[Rect::new(10, 10, 10, 10)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert!(frame.render_pass_list[0].quads[1].visible_rect.is_empty());
    }

    /// Test occlusion mapped into a scaled quad's content space.
    ///
    /// # Panics
    /// Panics if the scaled quad is not hidden.
    #[test]
    fn scaled_content_space() {
        init_logging();
        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 100, 100)), &[Rect::new(0, 0, 100, 100)]);
        let scaled = SharedQuadState::new(Transform::scale(2.0, 2.0), Rect::new(0, 0, 80, 80));
        add_group(&mut pass, scaled, &[Rect::new(0, 0, 25, 25), Rect::new(40, 0, 20, 20)]);
        let mut frame = AggregatedFrame::new(vec![pass]);

        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert!(quads[1].visible_rect.is_empty());
        assert_eq!(quads[2].visible_rect, Rect::new(50, 0, 10, 20));
    }
}

#[cfg(test)]
mod transform_tests {
    use super::*;

    /// Test that rotated quads are only removed when fully covered in target
    /// space, and never partially shrunk.
    ///
    /// # Panics
    /// Panics if a rotated quad is shrunk or a covered one survives.
    #[test]
    fn rotated_quads_fall_back_to_target_space() {
        init_logging();
        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 1000, 1000)), &[Rect::new(0, 0, 1000, 1000)]);
        let inside = SharedQuadState::new(
            Transform::rotate(45.0).then(&Transform::translate(500.0, 500.0)),
            Rect::new(0, 0, 10, 10),
        );
        add_group(&mut pass, inside, &[Rect::new(0, 0, 10, 10)]);
        let straddling = SharedQuadState::new(
            Transform::rotate(45.0).then(&Transform::translate(995.0, 500.0)),
            Rect::new(0, 0, 10, 10),
        );
        add_group(&mut pass, straddling, &[Rect::new(0, 0, 10, 10)]);
        let mut frame = AggregatedFrame::new(vec![pass]);

        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert!(quads[1].visible_rect.is_empty());
        assert_eq!(quads[2].visible_rect, Rect::new(0, 0, 10, 10));
    }

    /// Full-pass occluder in front of two 10x10 quads drawn through `local`:
    /// one placed well inside the occluder, one straddling its right edge.
    fn covered_and_straddling(local: Transform) -> AggregatedFrame {
        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 1000, 1000)), &[Rect::new(0, 0, 1000, 1000)]);
        for offset in [500.0, 995.0] {
            let state = SharedQuadState::new(
                local.then(&Transform::translate(offset, 500.0)),
                Rect::new(0, 0, 10, 10),
            );
            add_group(&mut pass, state, &[Rect::new(0, 0, 10, 10)]);
        }
        AggregatedFrame::new(vec![pass])
    }

    /// Test that skewed quads are removed only when their target-space
    /// bounds are fully covered.
    ///
    /// # Panics
    /// Panics if the covered quad survives or the straddling one changes.
    #[test]
    fn skewed_quads_fall_back_to_target_space() {
        init_logging();
        let mut frame = covered_and_straddling(Transform::skew(20.0, 0.0));
        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert!(quads[1].visible_rect.is_empty());
        assert_eq!(quads[2].visible_rect, Rect::new(0, 0, 10, 10));
        assert_eq!(stats.quads_removed, 1);
        assert_eq!(stats.quads_shrunk + stats.quads_split, 0);
    }

    /// Test that quads under an x/y perspective are removed only when their
    /// target-space bounds are fully covered.
    ///
    /// # Panics
    /// Panics if the covered quad survives or the straddling one changes.
    #[test]
    fn perspective_quads_fall_back_to_target_space() {
        init_logging();
        let mut frame = covered_and_straddling(Transform::perspective(0.001, 0.0));
        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert!(quads[1].visible_rect.is_empty());
        assert_eq!(quads[2].visible_rect, Rect::new(0, 0, 10, 10));
        assert_eq!(stats.quads_removed, 1);
        assert_eq!(stats.quads_shrunk + stats.quads_split, 0);
    }

    /// Test that a quad under an x/y perspective never occludes anything.
    ///
    /// # Panics
    /// Panics if the quad behind it changes.
    #[test]
    fn perspective_quads_do_not_occlude() {
        init_logging();
        let mut pass = root_pass();
        let projected = SharedQuadState::new(
            Transform::perspective(0.0, 0.0005),
            Rect::new(0, 0, 1000, 1000),
        );
        add_group(&mut pass, projected, &[Rect::new(0, 0, 1000, 1000)]);
        add_group(&mut pass, opaque(Rect::new(10, 10, 20, 20)), &[Rect::new(10, 10, 20, 20)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }

    /// Test that a rotated quad never occludes anything.
    ///
    /// # Panics
    /// Panics if the quad behind a rotated quad changes.
    #[test]
    fn rotated_quads_do_not_occlude() {
        init_logging();
        let mut pass = root_pass();
        let rotated = SharedQuadState::new(
            Transform::rotate(30.0).then(&Transform::translate(500.0, 500.0)),
            Rect::new(-200, -200, 400, 400),
        );
        add_group(&mut pass, rotated, &[Rect::new(-200, -200, 400, 400)]);
        add_group(&mut pass, opaque(Rect::new(490, 490, 20, 20)), &[Rect::new(490, 490, 20, 20)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }

    /// Test that quads in a 3D rendering context neither occlude nor get
    /// occluded.
    ///
    /// # Panics
    /// Panics if a 3D-context quad changes or hides another quad.
    #[test]
    fn sorting_context_excluded() {
        init_logging();
        let mut pass = root_pass();
        let mut front = opaque(Rect::new(0, 0, 100, 100));
        front.sorting_context_id = 3;
        add_group(&mut pass, front, &[Rect::new(0, 0, 100, 100)]);
        let mut middle = opaque(Rect::new(10, 10, 50, 50));
        middle.sorting_context_id = 3;
        add_group(&mut pass, middle, &[Rect::new(10, 10, 50, 50)]);
        add_group(&mut pass, opaque(Rect::new(20, 20, 10, 10)), &[Rect::new(20, 20, 10, 10)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);

        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 100, 100)), &[Rect::new(0, 0, 100, 100)]);
        let mut behind = opaque(Rect::new(10, 10, 50, 50));
        behind.sorting_context_id = 1;
        add_group(&mut pass, behind, &[Rect::new(10, 10, 50, 50)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }
}

#[cfg(test)]
mod rounded_corner_tests {
    use super::*;

    /// Test that a rounded occluder hides its interior but not its corners.
    ///
    /// # Panics
    /// Panics if a corner quad is hidden or an interior quad survives.
    #[test]
    fn corners_stay_visible() {
        init_logging();
        let mut pass = root_pass();
        let mut front = opaque(Rect::new(0, 0, 100, 100));
        front.mask_filter_info = Some(MaskFilterInfo::new(RRectF::uniform(
            RectF::new(0.0, 0.0, 100.0, 100.0),
            20.0,
        )));
        add_group(&mut pass, front, &[Rect::new(0, 0, 100, 100)]);
        add_group(
            &mut pass,
            opaque(Rect::new(0, 0, 100, 100)),
            &[
                Rect::new(0, 0, 5, 5),
                Rect::new(95, 95, 5, 5),
                Rect::new(10, 10, 80, 80),
            ],
        );
        let mut frame = AggregatedFrame::new(vec![pass]);

        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let quads = &frame.render_pass_list[0].quads;
        assert_eq!(quads[1].visible_rect, Rect::new(0, 0, 5, 5));
        assert_eq!(quads[2].visible_rect, Rect::new(95, 95, 5, 5));
        assert!(quads[3].visible_rect.is_empty());
    }

    /// Test the multi-rectangle occluder on a large rounded quad.
    ///
    /// # Panics
    /// Panics if the side columns do not occlude.
    #[test]
    fn complex_occluder_hides_side_columns() {
        init_logging();
        let settings = CullerSettings {
            generate_complex_occluder_for_rounded_corners: true,
            ..CullerSettings::default()
        };
        let build = || {
            let mut pass = root_pass();
            let mut front = opaque(Rect::new(0, 0, 200, 200));
            front.mask_filter_info = Some(MaskFilterInfo::new(RRectF::uniform(
                RectF::new(0.0, 0.0, 200.0, 200.0),
                30.0,
            )));
            add_group(&mut pass, front, &[Rect::new(0, 0, 200, 200)]);
            add_group(&mut pass, opaque(Rect::new(0, 0, 200, 200)), &[Rect::new(2, 40, 10, 100)]);
            AggregatedFrame::new(vec![pass])
        };

        let mut frame = build();
        culler_with(settings).remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert!(frame.render_pass_list[0].quads[1].visible_rect.is_empty());

        let mut frame = build();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(
            frame.render_pass_list[0].quads[1].visible_rect,
            Rect::new(2, 40, 7, 100)
        );
    }
}

#[cfg(test)]
mod limit_tests {
    use super::*;

    /// Test that the occlusion region keeps only its largest rectangles.
    ///
    /// # Panics
    /// Panics if a dropped occluder still hides quads or a kept one does not.
    #[test]
    fn complexity_cap_keeps_largest() {
        init_logging();
        let settings = CullerSettings {
            maximum_occluder_complexity: 2,
            ..CullerSettings::default()
        };
        let occluders = [
            Rect::new(0, 0, 200, 100),
            Rect::new(300, 0, 100, 100),
            Rect::new(500, 0, 10, 100),
            Rect::new(600, 0, 50, 100),
        ];
        let mut pass = root_pass();
        for occluder in occluders {
            add_group(&mut pass, opaque(occluder), &[occluder]);
        }
        add_group(&mut pass, opaque(Rect::new(0, 0, 700, 100)), &occluders);
        let mut frame = AggregatedFrame::new(vec![pass]);

        culler_with(settings).remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        let hidden = &frame.render_pass_list[0].quads[4..];
        assert!(hidden[0].visible_rect.is_empty());
        assert!(hidden[1].visible_rect.is_empty());
        assert_eq!(hidden[2].visible_rect, occluders[2]);
        assert_eq!(hidden[3].visible_rect, occluders[3]);
    }

    /// Test that occluders below the minimum size are ignored.
    ///
    /// # Panics
    /// Panics if a small occluder hides a quad.
    #[test]
    fn small_occluders_ignored() {
        init_logging();
        let settings = CullerSettings {
            occluder_minimum_visible_quad_size: 101,
            ..CullerSettings::default()
        };
        let mut pass = root_pass();
        add_group(&mut pass, opaque(Rect::new(0, 0, 10, 10)), &[Rect::new(0, 0, 10, 10)]);
        add_group(&mut pass, opaque(Rect::new(0, 0, 5, 5)), &[Rect::new(0, 0, 5, 5)]);
        let mut frame = AggregatedFrame::new(vec![pass]);
        let before = frame.clone();
        culler_with(settings).remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }

    /// Test that a quad whose fragments would exceed the split limit is only
    /// shrunk.
    ///
    /// # Panics
    /// Panics if the quad is split.
    #[test]
    fn split_limit_respected() {
        init_logging();
        let settings = CullerSettings {
            quad_split_limit: 3,
            ..CullerSettings::default()
        };
        let mut frame = ring_frame();
        let stats = culler_with(settings).remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame.render_pass_list[0].quads.len(), 2);
        assert_eq!(stats.quads_split, 0);
    }
}

#[cfg(test)]
mod collaborator_tests {
    use super::*;

    /// Test that the overlay processor can switch splitting off.
    ///
    /// # Panics
    /// Panics if the quad is split anyway.
    #[test]
    fn splitting_disabled() {
        init_logging();
        let culler = OcclusionCuller::new(
            CullerSettings::default(),
            Box::new(DefaultOverlayProcessor::without_splitting()),
        );
        let mut frame = ring_frame();
        let before = frame.clone();
        culler.remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }

    /// Test that overlay candidate textures are never split.
    ///
    /// # Panics
    /// Panics if an overlay candidate is split.
    #[test]
    fn overlay_candidate_not_split() {
        init_logging();
        let mut frame = ring_frame();
        frame.render_pass_list[0].quads[1].material = Material::TextureContent {
            resource_id: ResourceId(3),
        };
        let before = frame.clone();
        let candidates: OverlayCandidateSet = [ResourceId(3)].into_iter().collect();
        culler().remove_overdraw_quads(&mut frame, &candidates);
        assert_eq!(frame, before);

        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame.render_pass_list[0].quads.len(), 5);
    }

    /// Test that fragments feeding a pixel-moving backdrop filter are not
    /// split, while render pass quads themselves are never touched.
    ///
    /// # Panics
    /// Panics if a quad under a backdrop filter is split.
    #[test]
    fn backdrop_filter_blocks_split() {
        init_logging();
        let mut child = RenderPass::new(RenderPassId(7), Rect::new(0, 0, 400, 400));
        child.backdrop_filters.push(FilterOperation::Blur { sigma: 3.0 });

        let mut root = root_pass();
        let embed = root.push_shared_quad_state(opaque(Rect::new(0, 0, 400, 400)));
        root.push_quad(DrawQuad::new(
            Material::AggregatedRenderPass {
                render_pass_id: RenderPassId(7),
                resource_id: ResourceId(1),
            },
            Rect::new(0, 0, 400, 400),
            embed,
        ));
        let hole = Rect::new(100, 100, 200, 200);
        add_group(&mut root, opaque(hole), &[hole]);
        add_group(&mut root, opaque(Rect::new(0, 0, 400, 400)), &[Rect::new(0, 0, 400, 400)]);

        let mut frame = AggregatedFrame::new(vec![child, root]);
        let before = frame.clone();
        let stats = culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
        assert_eq!(stats.passes_skipped, 1);
        assert_eq!(stats.passes_culled, 1);

        frame.render_pass_list[0].backdrop_filters = vec![FilterOperation::Sepia(1.0)].into();
        culler().remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame.render_pass_list[1].quads.len(), 6);
    }

    /// Test that settings loaded from JSON drive the culler.
    ///
    /// # Panics
    /// Panics if the settings fail to parse or are not applied.
    #[test]
    #[allow(clippy::unwrap_used, reason = "Test code may use unwrap for simplicity")]
    fn settings_from_json() {
        init_logging();
        let settings =
            CullerSettings::from_json(r#"{ "minimum_fragments_reduced": 1000000 }"#).unwrap();
        let culler = culler_with(settings);
        assert_eq!(culler.settings().minimum_fragments_reduced, 1_000_000);
        let mut frame = ring_frame();
        let before = frame.clone();
        culler.remove_overdraw_quads(&mut frame, &NoOverlayCandidates);
        assert_eq!(frame, before);
    }
}
