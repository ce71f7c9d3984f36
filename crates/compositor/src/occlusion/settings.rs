//! Tunables for occlusion culling.
//!
//! Settings can be built programmatically, read from `COMPOSITOR_*`
//! environment variables, or parsed from JSON. Out-of-range values are
//! pulled back into a safe range rather than rejected.

use anyhow::{Context as _, Result as AnyResult};
use core::f32::consts::FRAC_1_SQRT_2;
use core::str::FromStr;
use std::env;

/// Fraction of a corner radius to inset an occluder by so that it stays clear
/// of the rounded cut-out. Approximates `1 - sin(45°)`, rounded up.
pub const ROUNDED_CORNER_INSET_COEFFICIENT: f32 = 0.3;

/// Smallest inset coefficient that still keeps occluders inside the curve.
const MIN_INSET_COEFFICIENT: f32 = 1.0 - FRAC_1_SQRT_2;

/// Configuration of an [`OcclusionCuller`](super::OcclusionCuller).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CullerSettings {
    /// Minimum area, in target pixels, an occluder needs to be recorded.
    #[serde(alias = "occluder_minium_visible_quad_size")]
    pub occluder_minimum_visible_quad_size: u64,
    /// Maximum number of rectangles in the accumulated occlusion region.
    pub maximum_occluder_complexity: usize,
    /// Maximum number of quads a single quad may be split into.
    pub quad_split_limit: usize,
    /// Minimum number of DIP² a split must save to be worth it.
    pub minimum_fragments_reduced: u64,
    /// Use up to three rectangles, instead of one, to occlude with a rounded
    /// quad.
    pub generate_complex_occluder_for_rounded_corners: bool,
    /// Minimum area a rounded quad needs for the multi-rectangle occluder.
    #[serde(alias = "minumum_quad_size_with_rounded_corners")]
    pub minimum_quad_size_with_rounded_corners: u64,
    /// Fraction of each corner radius an occluder is inset by.
    pub rounded_corner_inset_coefficient: f32,
}

impl CullerSettings {
    /// Default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            occluder_minimum_visible_quad_size: 1,
            maximum_occluder_complexity: 10,
            quad_split_limit: 5,
            minimum_fragments_reduced: 128 * 128,
            generate_complex_occluder_for_rounded_corners: false,
            minimum_quad_size_with_rounded_corners: 100 * 100,
            rounded_corner_inset_coefficient: ROUNDED_CORNER_INSET_COEFFICIENT,
        }
    }

    /// Load settings from environment variables.
    ///
    /// Reads the following variables, falling back to the default for any
    /// that is missing or does not parse:
    /// - `COMPOSITOR_OCCLUDER_MINIMUM_VISIBLE_QUAD_SIZE`
    /// - `COMPOSITOR_MAXIMUM_OCCLUDER_COMPLEXITY`
    /// - `COMPOSITOR_QUAD_SPLIT_LIMIT`
    /// - `COMPOSITOR_MINIMUM_FRAGMENTS_REDUCED`
    /// - `COMPOSITOR_COMPLEX_ROUNDED_CORNER_OCCLUDERS`: set to "1" to enable
    /// - `COMPOSITOR_MINIMUM_QUAD_SIZE_WITH_ROUNDED_CORNERS`
    /// - `COMPOSITOR_ROUNDED_CORNER_INSET_COEFFICIENT`
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load settings from an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(value: Option<String>, fallback: T) -> T {
            value
                .and_then(|val| val.trim().parse::<T>().ok())
                .unwrap_or(fallback)
        }

        let defaults = Self::new();
        Self {
            occluder_minimum_visible_quad_size: parsed(
                lookup("COMPOSITOR_OCCLUDER_MINIMUM_VISIBLE_QUAD_SIZE"),
                defaults.occluder_minimum_visible_quad_size,
            ),
            maximum_occluder_complexity: parsed(
                lookup("COMPOSITOR_MAXIMUM_OCCLUDER_COMPLEXITY"),
                defaults.maximum_occluder_complexity,
            ),
            quad_split_limit: parsed(
                lookup("COMPOSITOR_QUAD_SPLIT_LIMIT"),
                defaults.quad_split_limit,
            ),
            minimum_fragments_reduced: parsed(
                lookup("COMPOSITOR_MINIMUM_FRAGMENTS_REDUCED"),
                defaults.minimum_fragments_reduced,
            ),
            generate_complex_occluder_for_rounded_corners: lookup(
                "COMPOSITOR_COMPLEX_ROUNDED_CORNER_OCCLUDERS",
            )
            .as_deref()
                == Some("1"),
            minimum_quad_size_with_rounded_corners: parsed(
                lookup("COMPOSITOR_MINIMUM_QUAD_SIZE_WITH_ROUNDED_CORNERS"),
                defaults.minimum_quad_size_with_rounded_corners,
            ),
            rounded_corner_inset_coefficient: parsed(
                lookup("COMPOSITOR_ROUNDED_CORNER_INSET_COEFFICIENT"),
                defaults.rounded_corner_inset_coefficient,
            ),
        }
        .sanitized()
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid settings object.
    pub fn from_json(json: &str) -> AnyResult<Self> {
        let settings: Self =
            serde_json::from_str(json).context("failed to parse occlusion culler settings")?;
        Ok(settings.sanitized())
    }

    /// Pull every value into its supported range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.maximum_occluder_complexity = self.maximum_occluder_complexity.max(1);
        self.quad_split_limit = self.quad_split_limit.max(1);
        self.rounded_corner_inset_coefficient = if self.rounded_corner_inset_coefficient.is_nan() {
            ROUNDED_CORNER_INSET_COEFFICIENT
        } else {
            self.rounded_corner_inset_coefficient
                .clamp(MIN_INSET_COEFFICIENT, 1.0)
        };
        self
    }
}

impl Default for CullerSettings {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Test that variables override defaults and bad values fall back.
    ///
    /// # Panics
    /// Panics if a variable is ignored or a bad value is kept.
    #[test]
    fn settings_from_vars() {
        let vars: HashMap<&str, &str> = [
            ("COMPOSITOR_QUAD_SPLIT_LIMIT", "8"),
            ("COMPOSITOR_MAXIMUM_OCCLUDER_COMPLEXITY", "not a number"),
            ("COMPOSITOR_COMPLEX_ROUNDED_CORNER_OCCLUDERS", "1"),
            ("COMPOSITOR_ROUNDED_CORNER_INSET_COEFFICIENT", "0.1"),
        ]
        .into_iter()
        .collect();
        let settings =
            CullerSettings::from_vars(|key| vars.get(key).map(|val| (*val).to_owned()));

        assert_eq!(settings.quad_split_limit, 8);
        assert_eq!(settings.maximum_occluder_complexity, 10);
        assert!(settings.generate_complex_occluder_for_rounded_corners);
        assert!(settings.rounded_corner_inset_coefficient >= MIN_INSET_COEFFICIENT);
        assert_eq!(settings.minimum_fragments_reduced, 16384);
    }

    /// Test JSON parsing, including the historical field spellings.
    ///
    /// # Panics
    /// Panics if parsing fails or a field is misread.
    #[test]
    #[allow(clippy::unwrap_used, reason = "Test code may use unwrap for simplicity")]
    fn settings_from_json() {
        let settings = CullerSettings::from_json(
            r#"{
                "occluder_minium_visible_quad_size": 64,
                "minumum_quad_size_with_rounded_corners": 400,
                "quad_split_limit": 0
            }"#,
        )
        .unwrap();
        assert_eq!(settings.occluder_minimum_visible_quad_size, 64);
        assert_eq!(settings.minimum_quad_size_with_rounded_corners, 400);
        assert_eq!(settings.quad_split_limit, 1);
        assert_eq!(settings.maximum_occluder_complexity, 10);

        assert!(CullerSettings::from_json("[1, 2]").is_err());
        assert_eq!(CullerSettings::from_json("{}").unwrap(), CullerSettings::default());
    }
}
