//! Rounded rectangles used for mask bounds.

use super::RectF;

/// Corners of a rectangle, usable as an index into corner arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

/// Elliptical radius of a single corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CornerRadius {
    /// Horizontal radius.
    pub x: f32,
    /// Vertical radius.
    pub y: f32,
}

impl CornerRadius {
    /// Circular radius.
    #[must_use]
    pub const fn circular(radius: f32) -> Self {
        Self {
            x: radius,
            y: radius,
        }
    }

    /// Check if the corner is square.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.x <= 0.0 || self.y <= 0.0
    }
}

/// A rectangle with independently rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct RRectF {
    /// Outer bounds.
    pub rect: RectF,
    /// Corner radii, indexed by [`Corner`].
    radii: [CornerRadius; 4],
}

impl RRectF {
    /// Rounded rectangle with the same circular radius on every corner.
    #[must_use]
    pub const fn uniform(rect: RectF, radius: f32) -> Self {
        let corner = CornerRadius::circular(radius);
        Self {
            rect,
            radii: [corner; 4],
        }
    }

    /// Rounded rectangle with per-corner radii.
    #[must_use]
    pub fn new(
        rect: RectF,
        top_left: CornerRadius,
        top_right: CornerRadius,
        bottom_right: CornerRadius,
        bottom_left: CornerRadius,
    ) -> Self {
        let mut radii = [CornerRadius::default(); 4];
        radii[Corner::TopLeft as usize] = top_left;
        radii[Corner::TopRight as usize] = top_right;
        radii[Corner::BottomRight as usize] = bottom_right;
        radii[Corner::BottomLeft as usize] = bottom_left;
        Self { rect, radii }
    }

    /// Radius of one corner.
    #[must_use]
    pub const fn radius(&self, corner: Corner) -> CornerRadius {
        self.radii[corner as usize]
    }

    /// Replace the radius of one corner.
    pub const fn set_radius(&mut self, corner: Corner, radius: CornerRadius) {
        self.radii[corner as usize] = radius;
    }

    /// Check if the bounds have no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Check if any corner is rounded.
    #[must_use]
    pub fn has_rounded_corners(&self) -> bool {
        self.radii.iter().any(|radius| !radius.is_zero())
    }

    /// Check if every corner is circular (equal x and y radius).
    #[must_use]
    pub fn is_axis_uniform(&self) -> bool {
        self.radii
            .iter()
            .all(|radius| (radius.x - radius.y).abs() <= f32::EPSILON)
    }
}
