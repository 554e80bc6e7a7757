//! Convex footprint shapes.
//!
//! Shapes are described in the robot's body frame with the reference point
//! at the origin, then posed in the world by an `(x, y, θ)` pose. The
//! mutable [`ConvexShape`] description is finalized into an immutable
//! [`FinalConvexShape`] before it participates in collision checks, so a
//! profile can never change geometry mid-detection.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Rotate a planar vector counter-clockwise by `theta` radians.
#[inline]
pub(crate) fn rotate(v: &Vector2<f64>, theta: f64) -> Vector2<f64> {
    let (sin_t, cos_t) = theta.sin_cos();
    Vector2::new(v.x * cos_t - v.y * sin_t, v.x * sin_t + v.y * cos_t)
}

/// A convex 2-D primitive in body frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConvexShape {
    /// Circle centered on the reference point.
    Circle {
        /// Radius in meters.
        radius: f64,
    },
    /// Rectangle centered on the reference point, axis-aligned in body
    /// frame.
    Box {
        /// Full extent along body x in meters.
        width: f64,
        /// Full extent along body y in meters.
        depth: f64,
    },
    /// Convex polygon around the reference point, counter-clockwise.
    Polygon {
        /// Vertices in body frame.
        vertices: Vec<Vector2<f64>>,
    },
}

impl ConvexShape {
    /// Circumscribing radius about the reference point.
    ///
    /// This is the inflation distance that makes an axis-aligned box around
    /// the reference point's path a conservative bound for the whole shape,
    /// regardless of heading.
    pub fn characteristic_length(&self) -> f64 {
        match self {
            ConvexShape::Circle { radius } => *radius,
            ConvexShape::Box { width, depth } => 0.5 * (width * width + depth * depth).sqrt(),
            ConvexShape::Polygon { vertices } => vertices
                .iter()
                .map(|v| v.norm())
                .fold(0.0, f64::max),
        }
    }

    /// Finalize into an immutable shape with its characteristic length
    /// precomputed.
    pub fn finalize(self) -> FinalConvexShape {
        FinalConvexShape {
            characteristic_length: self.characteristic_length(),
            shape: self,
        }
    }

    /// World-frame support point: the point of the posed shape farthest
    /// along `dir`.
    ///
    /// A zero direction returns the posed reference point.
    pub fn support(&self, dir: &Vector2<f64>, pose: &Vector3<f64>) -> Vector2<f64> {
        let center = Vector2::new(pose.x, pose.y);
        match self {
            ConvexShape::Circle { radius } => {
                let len = dir.norm();
                if len < 1e-12 {
                    return center;
                }
                center + dir * (*radius / len)
            }
            ConvexShape::Box { width, depth } => {
                let local_dir = rotate(dir, -pose.z);
                let sx = if local_dir.x >= 0.0 { 0.5 * width } else { -0.5 * width };
                let sy = if local_dir.y >= 0.0 { 0.5 * depth } else { -0.5 * depth };
                center + rotate(&Vector2::new(sx, sy), pose.z)
            }
            ConvexShape::Polygon { vertices } => {
                let local_dir = rotate(dir, -pose.z);
                let mut best = Vector2::zeros();
                let mut best_dot = f64::NEG_INFINITY;
                for v in vertices {
                    let d = local_dir.dot(v);
                    if d > best_dot {
                        best_dot = d;
                        best = *v;
                    }
                }
                center + rotate(&best, pose.z)
            }
        }
    }
}

/// An immutable, finalized convex shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalConvexShape {
    shape: ConvexShape,
    characteristic_length: f64,
}

impl FinalConvexShape {
    /// The source shape.
    #[inline]
    pub fn shape(&self) -> &ConvexShape {
        &self.shape
    }

    /// Circumscribing radius about the reference point.
    #[inline]
    pub fn characteristic_length(&self) -> f64 {
        self.characteristic_length
    }

    /// World-frame support point of the posed shape.
    #[inline]
    pub fn support(&self, dir: &Vector2<f64>, pose: &Vector3<f64>) -> Vector2<f64> {
        self.shape.support(dir, pose)
    }
}

/// A finalized general shape: a union of convex components.
///
/// Robot footprints are single convex shapes, but static regions may be
/// unions of convex pieces; the detectors test each component separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalShape {
    components: Vec<FinalConvexShape>,
    characteristic_length: f64,
}

impl FinalShape {
    /// Build a shape from convex components.
    pub fn from_components(components: Vec<FinalConvexShape>) -> Self {
        let characteristic_length = components
            .iter()
            .map(|c| c.characteristic_length())
            .fold(0.0, f64::max);
        Self {
            components,
            characteristic_length,
        }
    }

    /// The convex components of this shape.
    #[inline]
    pub fn components(&self) -> &[FinalConvexShape] {
        &self.components
    }

    /// Circumscribing radius over all components.
    #[inline]
    pub fn characteristic_length(&self) -> f64 {
        self.characteristic_length
    }
}

impl From<FinalConvexShape> for FinalShape {
    fn from(shape: FinalConvexShape) -> Self {
        Self::from_components(vec![shape])
    }
}
