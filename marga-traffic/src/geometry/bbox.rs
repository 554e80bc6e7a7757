//! Axis-aligned bounding boxes for broad-phase pruning.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: Vector2<f64>,
    /// Upper-right corner.
    pub max: Vector2<f64>,
}

impl BoundingBox {
    /// Create a box from its corners.
    #[inline]
    pub fn new(min: Vector2<f64>, max: Vector2<f64>) -> Self {
        Self { min, max }
    }

    /// Box spanning the given per-axis `(min, max)` extrema.
    #[inline]
    pub fn from_extrema(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            min: Vector2::new(x.0, y.0),
            max: Vector2::new(x.1, y.1),
        }
    }

    /// A box which overlaps with nothing, including itself.
    ///
    /// `min` sits at `+∞` and `max` at `-∞`, so every per-axis interval
    /// test fails. Used in place of a bounding box for an absent shape.
    #[inline]
    pub fn void() -> Self {
        Self {
            min: Vector2::new(f64::INFINITY, f64::INFINITY),
            max: Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Grow the box by `value` on every side.
    #[inline]
    pub fn inflated(&self, value: f64) -> Self {
        let pad = Vector2::new(value, value);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Whether two boxes share any area. Touching edges count as overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        for i in 0..2 {
            if self.max[i] < other.min[i] {
                return false;
            }
            if other.max[i] < self.min[i] {
                return false;
            }
        }
        true
    }
}
