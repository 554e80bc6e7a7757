//! Cubic Hermite splines over trajectory segments.
//!
//! Each pair of consecutive waypoints defines one cubic per dimension,
//! parameterized by `t ∈ [0, 1]` over the segment's time interval. The
//! spline only exists on that interval; extrapolation is undefined and the
//! evaluators clamp nothing.

use nalgebra::Vector3;

use crate::geometry::BoundingBox;
use crate::time::Time;
use crate::trajectory::Waypoint;

/// Deadband below which a cubic coefficient is treated as zero.
const COEFF_DEADBAND: f64 = 1e-12;

/// Deadband below which the derivative discriminant is treated as a double
/// root. Deliberately wide so that near-tangent derivatives do not flip
/// between the one-root and two-root branches.
const DISCRIMINANT_DEADBAND: f64 = 1e-4;

/// Evaluate a cubic `c₀ + c₁t + c₂t² + c₃t³`.
#[inline]
pub(crate) fn evaluate(coeffs: &[f64; 4], t: f64) -> f64 {
    coeffs[3] * t * t * t + coeffs[2] * t * t + coeffs[1] * t + coeffs[0]
}

/// Evaluate the derivative `c₁ + 2c₂t + 3c₃t²`.
#[inline]
pub(crate) fn evaluate_derivative(coeffs: &[f64; 4], t: f64) -> f64 {
    3.0 * coeffs[3] * t * t + 2.0 * coeffs[2] * t + coeffs[1]
}

/// Extreme values of a cubic over `[0, 1]`, in closed form.
///
/// The endpoints are always candidates; interior critical points come from
/// the derivative's roots and only count when they land inside `[0, 1]`.
pub(crate) fn local_extrema(coeffs: &[f64; 4]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut consider = |t: f64| {
        if (0.0..=1.0).contains(&t) {
            let value = evaluate(coeffs, t);
            min = min.min(value);
            max = max.max(value);
        }
    };

    consider(0.0);
    consider(1.0);

    if coeffs[3].abs() < COEFF_DEADBAND {
        // Derivative is at most linear.
        if coeffs[2].abs() > COEFF_DEADBAND {
            consider(-coeffs[1] / (2.0 * coeffs[2]));
        }
    } else {
        let discriminant = 4.0 * coeffs[2] * coeffs[2] - 12.0 * coeffs[3] * coeffs[1];
        if discriminant.abs() < DISCRIMINANT_DEADBAND {
            consider(-coeffs[2] / (3.0 * coeffs[3]));
        } else if discriminant >= 0.0 {
            let sqrt_d = discriminant.sqrt();
            consider((-2.0 * coeffs[2] + sqrt_d) / (6.0 * coeffs[3]));
            consider((-2.0 * coeffs[2] - sqrt_d) / (6.0 * coeffs[3]));
        }
        // Negative discriminant: no interior critical points; the
        // endpoints already cover it.
    }

    (min, max)
}

/// One cubic motion segment between two waypoints.
///
/// Owns four coefficients per spatial dimension plus the segment's absolute
/// time bounds. Splines are lightweight views built on demand from a
/// segment of a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    coeffs: [[f64; 4]; 3],
    start_time: Time,
    finish_time: Time,
}

impl Spline {
    /// Build the Hermite spline for the segment from `start` to `finish`.
    pub fn from_segment(start: &Waypoint, finish: &Waypoint) -> Self {
        let delta_t = (finish.time - start.time).as_secs_f64();
        let mut coeffs = [[0.0; 4]; 3];
        for dim in 0..3 {
            let p0 = start.position[dim];
            let p1 = finish.position[dim];
            // Hermite tangents scaled into parametric time.
            let m0 = start.velocity[dim] * delta_t;
            let m1 = finish.velocity[dim] * delta_t;
            coeffs[dim] = [
                p0,
                m0,
                -3.0 * p0 - 2.0 * m0 + 3.0 * p1 - m1,
                2.0 * p0 + m0 - 2.0 * p1 + m1,
            ];
        }
        Self {
            coeffs,
            start_time: start.time,
            finish_time: finish.time,
        }
    }

    /// Absolute time at which the segment begins.
    #[inline]
    pub fn start_time(&self) -> Time {
        self.start_time
    }

    /// Absolute time at which the segment ends.
    #[inline]
    pub fn finish_time(&self) -> Time {
        self.finish_time
    }

    /// Raw per-dimension coefficient arrays `[c₀, c₁, c₂, c₃]`.
    #[inline]
    pub fn coefficients(&self) -> &[[f64; 4]; 3] {
        &self.coeffs
    }

    /// Pose at parametric `t ∈ [0, 1]`.
    pub fn position(&self, t: f64) -> Vector3<f64> {
        Vector3::new(
            evaluate(&self.coeffs[0], t),
            evaluate(&self.coeffs[1], t),
            evaluate(&self.coeffs[2], t),
        )
    }

    /// Derivative with respect to parametric `t`.
    pub fn velocity(&self, t: f64) -> Vector3<f64> {
        Vector3::new(
            evaluate_derivative(&self.coeffs[0], t),
            evaluate_derivative(&self.coeffs[1], t),
            evaluate_derivative(&self.coeffs[2], t),
        )
    }

    /// Map an absolute in-segment time onto the parametric interval.
    #[inline]
    pub fn parameter(&self, time: Time) -> f64 {
        let span = (self.finish_time - self.start_time).as_secs_f64();
        (time - self.start_time).as_secs_f64() / span
    }

    /// Pose at an absolute time within the segment.
    pub fn position_at(&self, time: Time) -> Vector3<f64> {
        self.position(self.parameter(time))
    }

    /// Velocity in units per second at an absolute time within the segment.
    pub fn velocity_at(&self, time: Time) -> Vector3<f64> {
        let span = (self.finish_time - self.start_time).as_secs_f64();
        self.velocity(self.parameter(time)) / span
    }

    /// Axis-aligned box covering the reference point's path over the whole
    /// segment.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_extrema(local_extrema(&self.coeffs[0]), local_extrema(&self.coeffs[1]))
    }
}
