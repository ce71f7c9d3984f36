//! Filter effects applied to render passes.

/// A single filter effect.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FilterOperation {
    Grayscale(f32),
    Sepia(f32),
    Saturate(f32),
    HueRotate(f32),
    Invert(f32),
    Brightness(f32),
    Contrast(f32),
    Opacity(f32),
    /// Gaussian blur.
    Blur { sigma: f32 },
    /// Blurred, offset copy drawn beneath the content.
    DropShadow {
        offset_x: i32,
        offset_y: i32,
        sigma: f32,
    },
    /// Magnifies the content around its centre.
    Zoom { amount: f32, inset: i32 },
    /// Shifts the content.
    Offset { x: i32, y: i32 },
    /// Arbitrary filter graph.
    Reference,
    /// Cuts out pixels below an alpha threshold.
    AlphaThreshold,
}

impl FilterOperation {
    /// Check if output pixels can depend on input pixels at other positions.
    #[must_use]
    pub const fn moves_pixels(&self) -> bool {
        match self {
            Self::Blur { .. }
            | Self::DropShadow { .. }
            | Self::Zoom { .. }
            | Self::Offset { .. }
            | Self::Reference => true,
            Self::Grayscale(_)
            | Self::Sepia(_)
            | Self::Saturate(_)
            | Self::HueRotate(_)
            | Self::Invert(_)
            | Self::Brightness(_)
            | Self::Contrast(_)
            | Self::Opacity(_)
            | Self::AlphaThreshold => false,
        }
    }
}

/// An ordered chain of filter effects.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FilterOperations(pub Vec<FilterOperation>);

impl FilterOperations {
    /// Create an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Check if the chain has no effects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an effect.
    pub fn push(&mut self, operation: FilterOperation) {
        self.0.push(operation);
    }

    /// Check if any effect moves pixels.
    #[must_use]
    pub fn has_filter_that_moves_pixels(&self) -> bool {
        self.0.iter().any(FilterOperation::moves_pixels)
    }
}

impl From<Vec<FilterOperation>> for FilterOperations {
    fn from(operations: Vec<FilterOperation>) -> Self {
        Self(operations)
    }
}
