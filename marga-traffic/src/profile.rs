//! Participant profiles: footprint and vicinity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::FinalConvexShape;

/// The pair of convex regions a participant carries through detection.
///
/// The *footprint* is the area the robot physically occupies; the
/// *vicinity* is the larger buffer other robots' footprints must stay out
/// of. The vicinity is expected to contain the footprint; that containment
/// is assumed, not enforced. Shapes are shared by reference, so many
/// profiles can point at one finalized shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    footprint: Option<Arc<FinalConvexShape>>,
    vicinity: Option<Arc<FinalConvexShape>>,
}

impl Profile {
    /// An empty profile. With neither shape set, the participant is inert
    /// and can never be part of a conflict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footprint.
    pub fn with_footprint(mut self, shape: FinalConvexShape) -> Self {
        self.footprint = Some(Arc::new(shape));
        self
    }

    /// Set the vicinity.
    pub fn with_vicinity(mut self, shape: FinalConvexShape) -> Self {
        self.vicinity = Some(Arc::new(shape));
        self
    }

    /// The footprint, if any.
    #[inline]
    pub fn footprint(&self) -> Option<&FinalConvexShape> {
        self.footprint.as_deref()
    }

    /// The vicinity, if any.
    #[inline]
    pub fn vicinity(&self) -> Option<&FinalConvexShape> {
        self.vicinity.as_deref()
    }

    /// Normalize for detection: an unset vicinity defaults to the
    /// footprint.
    pub(crate) fn normalized(&self) -> NormalizedProfile {
        NormalizedProfile {
            footprint: self.footprint.clone(),
            vicinity: self.vicinity.clone().or_else(|| self.footprint.clone()),
        }
    }
}

/// A profile after vicinity promotion, as the detectors consume it.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedProfile {
    pub footprint: Option<Arc<FinalConvexShape>>,
    pub vicinity: Option<Arc<FinalConvexShape>>,
}

impl NormalizedProfile {
    /// Whether footprint and vicinity differ for this participant.
    ///
    /// When both participants are symmetric, testing one shape pairing is
    /// enough; asymmetric profiles need the swapped pairing too.
    pub fn is_asymmetric(&self) -> bool {
        self.footprint != self.vicinity
    }
}
