//! Quad-to-target transforms.

use super::Rect;
use super::rect::{enclosed_from_edges, enclosing_from_edges};

/// Matrix entries smaller than this count as zero when classifying transforms.
const AXIS_EPSILON: f64 = f32::EPSILON as f64;

/// Homogeneous `w` at or below this value is behind the eye.
const W_EPSILON: f64 = 1e-9;

/// Pivots at or below this magnitude make a matrix singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Bounds reported when a rectangle cannot be projected.
///
/// Spans half the `i32` range on each side of the origin: it intersects any
/// on-screen rectangle, and no occlusion region of on-screen size contains it.
const CLIPPED_BOUNDS: Rect = Rect::new(i32::MIN / 2, i32::MIN / 2, i32::MAX, i32::MAX);

/// 3D transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// 4x4 matrix in column-major order.
    matrix: [f64; 16],
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        #[rustfmt::skip]
        let matrix = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { matrix }
    }

    /// 2D translation.
    #[must_use]
    pub const fn translate(x: f64, y: f64) -> Self {
        #[rustfmt::skip]
        let matrix = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            x,   y,   0.0, 1.0,
        ];
        Self { matrix }
    }

    /// 2D scale. Negative factors mirror the axis.
    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        #[rustfmt::skip]
        let matrix = [
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { matrix }
    }

    /// Rotation around the Z axis (angle in degrees).
    ///
    /// Multiples of 90 degrees produce exact zero entries.
    #[must_use]
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        #[rustfmt::skip]
        let matrix = [
            cos,  sin, 0.0, 0.0,
            -sin, cos, 0.0, 0.0,
            0.0,  0.0, 1.0, 0.0,
            0.0,  0.0, 0.0, 1.0,
        ];
        Self { matrix }
    }

    /// Skew (angles in degrees).
    #[must_use]
    pub fn skew(x_degrees: f64, y_degrees: f64) -> Self {
        let skew_x = x_degrees.to_radians().tan();
        let skew_y = y_degrees.to_radians().tan();
        #[rustfmt::skip]
        let matrix = [
            1.0,    skew_y, 0.0, 0.0,
            skew_x, 1.0,    0.0, 0.0,
            0.0,    0.0,    1.0, 0.0,
            0.0,    0.0,    0.0, 1.0,
        ];
        Self { matrix }
    }

    /// 2D projective transform: `w` grows by `per_x` for each unit of x and
    /// by `per_y` for each unit of y.
    #[must_use]
    pub const fn perspective(per_x: f64, per_y: f64) -> Self {
        #[rustfmt::skip]
        let matrix = [
            1.0, 0.0, 0.0, per_x,
            0.0, 1.0, 0.0, per_y,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { matrix }
    }

    const fn rc(&self, row: usize, col: usize) -> f64 {
        self.matrix[col * 4 + row]
    }

    /// Apply `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        let mut matrix = [0.0; 16];
        for (index, entry) in matrix.iter_mut().enumerate() {
            let (col, row) = (index / 4, index % 4);
            *entry = (0..4).map(|inner| next.rc(row, inner) * self.rc(inner, col)).sum();
        }
        Self { matrix }
    }

    /// Check if this is exactly the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    fn has_xy_perspective(&self) -> bool {
        self.rc(3, 0) != 0.0 || self.rc(3, 1) != 0.0
    }

    /// Check if an axis-aligned 2D rectangle stays axis-aligned once mapped.
    ///
    /// Degenerate transforms that collapse an axis still count as preserving
    /// alignment; x/y perspective never does.
    #[must_use]
    pub fn preserves_2d_axis_alignment(&self) -> bool {
        if self.has_xy_perspective() {
            return false;
        }
        let nonzero = |row, col| u8::from(self.rc(row, col).abs() > AXIS_EPSILON);
        let row_0 = nonzero(0, 0) + nonzero(0, 1);
        let row_1 = nonzero(1, 0) + nonzero(1, 1);
        let col_0 = nonzero(0, 0) + nonzero(1, 0);
        let col_1 = nonzero(0, 1) + nonzero(1, 1);
        row_0 <= 1 && row_1 <= 1 && col_0 <= 1 && col_1 <= 1
    }

    /// Stricter form of [`Self::preserves_2d_axis_alignment`].
    ///
    /// Accepts translation, per-axis scaling and mirroring, and right-angle
    /// rotations with positive scale. Rejects degenerate scales, rotations
    /// combined with a reflection, skews, general rotations and perspective.
    #[must_use]
    pub fn non_degenerate_preserves_2d_axis_alignment(&self) -> bool {
        if self.has_xy_perspective() || self.rc(3, 3) <= W_EPSILON {
            return false;
        }
        let nonzero = |value: f64| value.abs() > AXIS_EPSILON;
        let (scale_x, shear_x) = (self.rc(0, 0), self.rc(0, 1));
        let (shear_y, scale_y) = (self.rc(1, 0), self.rc(1, 1));
        let scales = nonzero(scale_x) && nonzero(scale_y) && !nonzero(shear_x) && !nonzero(shear_y);
        let rotates = !nonzero(scale_x)
            && !nonzero(scale_y)
            && nonzero(shear_x)
            && nonzero(shear_y)
            && shear_x * shear_y < 0.0;
        scales || rotates
    }

    /// Inverse transform, or `None` if the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let mut rows = [[0.0f64; 8]; 4];
        for (row, entries) in rows.iter_mut().enumerate() {
            for (col, entry) in entries.iter_mut().take(4).enumerate() {
                *entry = self.rc(row, col);
            }
            entries[4 + row] = 1.0;
        }

        for col in 0..4 {
            let pivot = (col..4).max_by(|&lhs, &rhs| {
                rows[lhs][col].abs().total_cmp(&rows[rhs][col].abs())
            })?;
            if rows[pivot][col].abs() <= SINGULAR_EPSILON {
                return None;
            }
            rows.swap(col, pivot);
            let scale = rows[col][col].recip();
            for value in &mut rows[col] {
                *value *= scale;
            }
            let pivot_row = rows[col];
            for (row, entries) in rows.iter_mut().enumerate() {
                let factor = entries[col];
                if row == col || factor == 0.0 {
                    continue;
                }
                for (value, pivot_value) in entries.iter_mut().zip(pivot_row) {
                    *value -= factor * pivot_value;
                }
            }
        }

        let mut matrix = [0.0; 16];
        for (row, entries) in rows.iter().enumerate() {
            for (col, value) in entries[4..].iter().enumerate() {
                matrix[col * 4 + row] = *value;
            }
        }
        matrix
            .iter()
            .all(|value| value.is_finite())
            .then_some(Self { matrix })
    }

    /// Map a 2D point, or `None` if it lands behind the eye.
    #[must_use]
    pub fn map_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let w = self.rc(3, 0) * x + self.rc(3, 1) * y + self.rc(3, 3);
        if w <= W_EPSILON {
            return None;
        }
        let mapped_x = self.rc(0, 0) * x + self.rc(0, 1) * y + self.rc(0, 3);
        let mapped_y = self.rc(1, 0) * x + self.rc(1, 1) * y + self.rc(1, 3);
        Some((mapped_x / w, mapped_y / w))
    }

    /// Map a rectangle through an axis-aligned transform and keep the whole
    /// pixels it fully covers.
    ///
    /// Returns the empty rectangle for transforms that do not preserve axis
    /// alignment.
    #[must_use]
    pub fn map_enclosed_rect(&self, rect: Rect) -> Rect {
        if self.is_identity() {
            return rect;
        }
        if !self.preserves_2d_axis_alignment() {
            return Rect::default();
        }
        let corners = (
            self.map_point(f64::from(rect.x), f64::from(rect.y)),
            self.map_point(f64::from(rect.right()), f64::from(rect.bottom())),
        );
        let (Some((first_x, first_y)), Some((second_x, second_y))) = corners else {
            return Rect::default();
        };
        enclosed_from_edges(
            first_x.min(second_x),
            first_y.min(second_y),
            first_x.max(second_x),
            first_y.max(second_y),
        )
    }

    /// Map a rectangle through any transform and return the integer bounds
    /// of the result.
    ///
    /// If any corner falls behind the eye the bounds are unbounded.
    #[must_use]
    pub fn map_enclosing_clipped_rect(&self, rect: Rect) -> Rect {
        if self.is_identity() {
            return rect;
        }
        let (left, top) = (f64::from(rect.x), f64::from(rect.y));
        let (right, bottom) = (f64::from(rect.right()), f64::from(rect.bottom()));
        let mut bounds = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in [(left, top), (right, top), (right, bottom), (left, bottom)] {
            let Some((mapped_x, mapped_y)) = self.map_point(x, y) else {
                return CLIPPED_BOUNDS;
            };
            bounds.0 = bounds.0.min(mapped_x);
            bounds.1 = bounds.1.min(mapped_y);
            bounds.2 = bounds.2.max(mapped_x);
            bounds.3 = bounds.3.max(mapped_y);
        }
        enclosing_from_edges(bounds.0, bounds.1, bounds.2, bounds.3)
    }
}

/// Sine and cosine of an angle in degrees, exact at multiples of 90.
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let quarter_turns = degrees.rem_euclid(360.0) / 90.0;
    if quarter_turns.fract() == 0.0 {
        return match quarter_turns as u8 {
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            3 => (-1.0, 0.0),
            _ => (0.0, 1.0),
        };
    }
    degrees.to_radians().sin_cos()
}
