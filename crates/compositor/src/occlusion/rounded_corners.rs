//! Occluding rectangles for rounded-corner masks.
//!
//! A rounded quad only occludes the part of its bounds inside the rounding
//! curves. Two approximations are used: a single rectangle inset from every
//! edge, or up to three rectangles (a full-height centre column flanked by
//! two shorter columns) that recover more area for large quads.

use super::CullerSettings;
use crate::geometry::{Corner, RRectF, Rect, RectF};
use crate::quads::MaskFilterInfo;

/// Target-space rectangles guaranteed to lie inside `mask`.
pub(crate) fn occluding_rects(mask: &MaskFilterInfo, settings: &CullerSettings) -> Vec<Rect> {
    let bounds = &mask.rounded_corner_bounds;
    if !mask.has_rounded_corners() {
        return vec![bounds.rect.to_enclosed_rect()];
    }
    if settings.generate_complex_occluder_for_rounded_corners
        && bounds.is_axis_uniform()
        && bounds.rect.to_enclosed_rect().area() >= settings.minimum_quad_size_with_rounded_corners
        && let Some(rects) = complex_occluder(bounds)
    {
        return rects;
    }
    vec![simple_occluder(bounds, settings.rounded_corner_inset_coefficient)]
}

/// Inset each edge by the larger of its two corner radii times `coefficient`.
fn simple_occluder(bounds: &RRectF, coefficient: f32) -> Rect {
    let top_left = bounds.radius(Corner::TopLeft);
    let top_right = bounds.radius(Corner::TopRight);
    let bottom_right = bounds.radius(Corner::BottomRight);
    let bottom_left = bounds.radius(Corner::BottomLeft);
    bounds
        .rect
        .inset(
            top_left.x.max(bottom_left.x) * coefficient,
            top_left.y.max(top_right.y) * coefficient,
            top_right.x.max(bottom_right.x) * coefficient,
            bottom_left.y.max(bottom_right.y) * coefficient,
        )
        .to_enclosed_rect()
}

/// Centre column plus the side columns between the corner radii. `None` if
/// the left and right radii leave no centre column.
fn complex_occluder(bounds: &RRectF) -> Option<Vec<Rect>> {
    let rect = bounds.rect;
    let top_left = bounds.radius(Corner::TopLeft);
    let top_right = bounds.radius(Corner::TopRight);
    let bottom_right = bounds.radius(Corner::BottomRight);
    let bottom_left = bounds.radius(Corner::BottomLeft);

    let inner_left = rect.x + top_left.x.max(bottom_left.x);
    let inner_right = rect.right() - top_right.x.max(bottom_right.x);
    if inner_left >= inner_right {
        return None;
    }

    let columns = [
        RectF::from_ltrb(inner_left, rect.y, inner_right, rect.bottom()),
        RectF::from_ltrb(
            rect.x,
            rect.y + top_left.y,
            inner_left,
            rect.bottom() - bottom_left.y,
        ),
        RectF::from_ltrb(
            inner_right,
            rect.y + top_right.y,
            rect.right(),
            rect.bottom() - bottom_right.y,
        ),
    ];
    Some(
        columns
            .into_iter()
            .map(RectF::to_enclosed_rect)
            .filter(|column| !column.is_empty())
            .collect(),
    )
}
