//! Collaborators consulted while culling.
//!
//! Overlay promotion runs after occlusion culling. Quads it has already
//! claimed must stay whole, and the overlay processor can switch quad
//! splitting off entirely.

use crate::quads::ResourceId;
use core::fmt::Debug;
use std::collections::HashSet;

/// Answers questions about display resources.
pub trait ResourceProvider {
    /// Check if the resource may be promoted to a hardware overlay plane.
    fn is_overlay_candidate(&self, resource_id: ResourceId) -> bool;
}

/// Decides how quads are presented on hardware planes.
pub trait OverlayProcessor: Debug + Send {
    /// Check if quad splitting must be skipped, for example because split
    /// quads would defeat overlay promotion.
    fn disable_splitting_quads(&self) -> bool;
}

/// Resource provider for displays without overlay support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlayCandidates;

impl ResourceProvider for NoOverlayCandidates {
    #[inline]
    fn is_overlay_candidate(&self, _resource_id: ResourceId) -> bool {
        false
    }
}

/// Resource provider backed by an explicit set of candidate resources.
#[derive(Debug, Clone, Default)]
pub struct OverlayCandidateSet {
    candidates: HashSet<ResourceId>,
}

impl OverlayCandidateSet {
    /// Mark a resource as an overlay candidate.
    pub fn insert(&mut self, resource_id: ResourceId) {
        self.candidates.insert(resource_id);
    }
}

impl FromIterator<ResourceId> for OverlayCandidateSet {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self {
            candidates: iter.into_iter().collect(),
        }
    }
}

impl ResourceProvider for OverlayCandidateSet {
    #[inline]
    fn is_overlay_candidate(&self, resource_id: ResourceId) -> bool {
        self.candidates.contains(&resource_id)
    }
}

/// Overlay processor with a fixed splitting policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOverlayProcessor {
    splitting_disabled: bool,
}

impl DefaultOverlayProcessor {
    /// Processor that allows quad splitting.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            splitting_disabled: false,
        }
    }

    /// Processor that forbids quad splitting.
    #[must_use]
    pub const fn without_splitting() -> Self {
        Self {
            splitting_disabled: true,
        }
    }
}

impl OverlayProcessor for DefaultOverlayProcessor {
    #[inline]
    fn disable_splitting_quads(&self) -> bool {
        self.splitting_disabled
    }
}
