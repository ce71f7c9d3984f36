//! Integer and float rectangles.
//!
//! Integer rectangles keep a non-negative size and use saturating arithmetic
//! for their right and bottom edges so that rectangles near `i32::MAX` never
//! wrap around.

/// Tolerance used when snapping float edges to integer pixels.
const SNAP_EPSILON: f64 = 1e-6;

/// A rectangle in integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// X coordinate of the left edge.
    pub x: i32,
    /// Y coordinate of the top edge.
    pub y: i32,
    /// Width in pixels, never negative.
    pub width: i32,
    /// Height in pixels, never negative.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle. Negative sizes are clamped to zero.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Create a rectangle from its edges.
    #[must_use]
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, span_length(left, right), span_length(top, bottom))
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Area in pixels, or `None` if it does not fit in an `i32`.
    #[must_use]
    pub const fn checked_area(self) -> Option<i32> {
        self.width.checked_mul(self.height)
    }

    /// Area in pixels as a `u64`, which cannot overflow.
    #[must_use]
    pub fn area(self) -> u64 {
        u64::from(self.width.unsigned_abs()) * u64::from(self.height.unsigned_abs())
    }

    /// Same origin, zero size.
    #[must_use]
    pub const fn with_empty_size(self) -> Self {
        Self::new(self.x, self.y, 0, 0)
    }

    /// Check if this rectangle intersects another.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Intersection of two rectangles; the empty rectangle if they are disjoint.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        if !self.intersects(other) {
            return Self::default();
        }
        Self::from_ltrb(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Smallest rectangle containing both rectangles. Empty inputs are ignored.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Check if `other` lies entirely inside this rectangle.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Check if the two rectangles share one complete edge, so their union is
    /// exactly their combined area.
    #[must_use]
    pub const fn shares_edge_with(self, other: Self) -> bool {
        let horizontal = self.y == other.y
            && self.height == other.height
            && (self.x == other.right() || self.right() == other.x);
        let vertical = self.x == other.x
            && self.width == other.width
            && (self.y == other.bottom() || self.bottom() == other.y);
        horizontal || vertical
    }

    /// Pull `i32::MAX` coordinates and sizes in by one pixel.
    ///
    /// Region math treats `i32::MAX` as a sentinel; a rectangle touching it
    /// would otherwise degenerate to an empty region.
    #[must_use]
    pub const fn clamped_for_region(self) -> Self {
        const fn clamp(value: i32) -> i32 {
            if value == i32::MAX { i32::MAX - 1 } else { value }
        }
        Self::new(
            clamp(self.x),
            clamp(self.y),
            clamp(self.width),
            clamp(self.height),
        )
    }
}

impl From<Rect> for RectF {
    fn from(rect: Rect) -> Self {
        Self::new(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        )
    }
}

/// Length between two edges, saturated into a non-negative `i32`.
fn span_length(start: i32, end: i32) -> i32 {
    let length = i64::from(end) - i64::from(start);
    i32::try_from(length.clamp(0, i64::from(i32::MAX))).unwrap_or(i32::MAX)
}

/// Snap float edges to the largest integer rectangle they enclose.
pub(crate) fn enclosed_from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    if [left, top, right, bottom].iter().any(|edge| edge.is_nan()) {
        return Rect::default();
    }
    let snapped_left = (left - SNAP_EPSILON).ceil() as i32;
    let snapped_top = (top - SNAP_EPSILON).ceil() as i32;
    let snapped_right = (right + SNAP_EPSILON).floor() as i32;
    let snapped_bottom = (bottom + SNAP_EPSILON).floor() as i32;
    Rect::from_ltrb(snapped_left, snapped_top, snapped_right, snapped_bottom)
}

/// Snap float edges to the smallest integer rectangle enclosing them.
pub(crate) fn enclosing_from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    if [left, top, right, bottom].iter().any(|edge| edge.is_nan()) {
        return Rect::default();
    }
    Rect::from_ltrb(
        left.floor() as i32,
        top.floor() as i32,
        right.ceil() as i32,
        bottom.ceil() as i32,
    )
}

/// A rectangle in fractional pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct RectF {
    /// X coordinate of the left edge.
    pub x: f32,
    /// Y coordinate of the top edge.
    pub y: f32,
    /// Width, never negative.
    pub width: f32,
    /// Height, never negative.
    pub height: f32,
}

impl RectF {
    /// Create a new rectangle. Negative sizes are clamped to zero.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle from its edges.
    #[inline]
    #[must_use]
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// X coordinate of the right edge.
    #[inline]
    #[must_use]
    pub const fn right(self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has no area.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink each edge inwards by the given amount.
    #[must_use]
    pub const fn inset(self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::from_ltrb(
            self.x + left,
            self.y + top,
            self.right() - right,
            self.bottom() - bottom,
        )
    }

    /// Largest integer rectangle inside this one.
    #[must_use]
    pub fn to_enclosed_rect(self) -> Rect {
        enclosed_from_edges(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }

    /// Smallest integer rectangle containing this one.
    #[must_use]
    pub fn to_enclosing_rect(self) -> Rect {
        enclosing_from_edges(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}
