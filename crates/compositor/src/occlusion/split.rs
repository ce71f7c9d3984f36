//! Policy for replacing a partially occluded quad with several smaller ones.

use crate::geometry::Rect;
use crate::overlay::ResourceProvider;
use crate::quads::Material;
use crate::region::Region;

/// Rectangles of `region` with neighbours sharing a full edge merged.
/// `None` if more than `limit` rectangles remain.
pub(crate) fn reduce_complexity(region: &Region, limit: usize) -> Option<Vec<Rect>> {
    let mut reduced: Vec<Rect> = Vec::new();
    for rect in region.rects() {
        if let Some(neighbour) = reduced.iter_mut().find(|kept| kept.shares_edge_with(rect)) {
            *neighbour = neighbour.union(rect);
            continue;
        }
        reduced.push(rect);
        if reduced.len() > limit {
            return None;
        }
    }
    Some(reduced)
}

/// Check if splitting a quad into `fragments` saves enough pixels to pay for
/// the extra draws.
///
/// `bounding_rect` is the bounding box of the fragments and
/// `minimum_fragments_reduced` is in DIP², scaled by the device scale factor.
pub(crate) fn can_split_quad(
    material: &Material,
    fragments: &[Rect],
    bounding_rect: Rect,
    minimum_fragments_reduced: u64,
    device_scale_factor: f32,
    resource_provider: &dyn ResourceProvider,
) -> bool {
    match *material {
        Material::DebugBorder | Material::VideoHole => return false,
        Material::TextureContent { resource_id }
            if resource_provider.is_overlay_candidate(resource_id) =>
        {
            return false;
        }
        _ => {}
    }

    let Some(fragments_area) = fragments.iter().try_fold(0i32, |total, fragment| {
        total.checked_add(fragment.checked_area()?)
    }) else {
        return false;
    };
    let Some(bounding_area) = bounding_rect.checked_area() else {
        return true;
    };
    let Some(fragments_reduced) = bounding_area.checked_sub(fragments_area) else {
        return false;
    };

    let scale = f64::from(device_scale_factor);
    f64::from(fragments_reduced) * scale * scale > minimum_fragments_reduced as f64
}
