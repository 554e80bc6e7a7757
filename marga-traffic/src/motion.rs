//! Continuous motion models for the collision solver.
//!
//! The solver advances through a shared parametric interval `[0, 1]`; a
//! motion maps that interval to world poses and bounds how fast anything
//! can move over what remains of it. Two models exist: a trajectory spline
//! restricted to an absolute time window, and a fixed pose for static
//! regions.

use nalgebra::Vector3;

use crate::geometry::BoundingBox;
use crate::spline::{self, Spline};
use crate::time::Time;

/// A motion over the parametric interval `[0, 1]`.
pub trait Motion {
    /// World pose `(x, y, θ)` at parametric `t`.
    fn pose_at(&self, t: f64) -> Vector3<f64>;

    /// Upper bound of the translational speed over `[from, 1]`, in length
    /// units per parametric unit.
    fn max_linear_speed(&self, from: f64) -> f64;

    /// Upper bound of `|θ̇|` over `[from, 1]`, in radians per parametric
    /// unit.
    fn max_angular_speed(&self, from: f64) -> f64;
}

/// Largest `|c₁ + 2c₂t + 3c₃t²|` over `[from, 1]`.
///
/// The derivative of a cubic is quadratic, so its extreme magnitude sits at
/// an interval endpoint or at the quadratic's vertex.
fn max_abs_derivative(coeffs: &[f64; 4], from: f64) -> f64 {
    let mut best = spline::evaluate_derivative(coeffs, from)
        .abs()
        .max(spline::evaluate_derivative(coeffs, 1.0).abs());
    if coeffs[3].abs() > 0.0 {
        let vertex = -coeffs[2] / (3.0 * coeffs[3]);
        if vertex > from && vertex < 1.0 {
            best = best.max(spline::evaluate_derivative(coeffs, vertex).abs());
        }
    }
    best
}

/// A spline restricted to an absolute time window and re-parameterized to
/// `[0, 1]`.
///
/// The detectors pre-allocate one of these per participant and rewrite it
/// for every segment pair via [`SplineMotion::update`], so the walk does no
/// per-pair allocation.
#[derive(Debug, Clone, Default)]
pub struct SplineMotion {
    coeffs: [[f64; 4]; 3],
}

impl SplineMotion {
    /// Build a motion for `spline` restricted to `[start, finish]`.
    pub fn from_spline(spline: &Spline, start: Time, finish: Time) -> Self {
        let mut motion = Self::default();
        motion.update(spline, start, finish);
        motion
    }

    /// Re-target this motion at `spline` restricted to `[start, finish]`.
    ///
    /// The window must lie within the spline's segment. Composing the cubic
    /// with the affine map `t = α + βu` yields another cubic in the window
    /// parameter `u`.
    pub fn update(&mut self, spline: &Spline, start: Time, finish: Time) {
        let span = (spline.finish_time() - spline.start_time()).as_secs_f64();
        let alpha = (start - spline.start_time()).as_secs_f64() / span;
        let beta = (finish - start).as_secs_f64() / span;

        for (dim, c) in spline.coefficients().iter().enumerate() {
            self.coeffs[dim] = [
                c[0] + c[1] * alpha + c[2] * alpha * alpha + c[3] * alpha * alpha * alpha,
                beta * (c[1] + 2.0 * c[2] * alpha + 3.0 * c[3] * alpha * alpha),
                beta * beta * (c[2] + 3.0 * c[3] * alpha),
                beta * beta * beta * c[3],
            ];
        }
    }

    /// Windowed per-dimension coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[[f64; 4]; 3] {
        &self.coeffs
    }

    /// Axis-aligned box covering the reference point's path over the
    /// window.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_extrema(
            spline::local_extrema(&self.coeffs[0]),
            spline::local_extrema(&self.coeffs[1]),
        )
    }
}

impl Motion for SplineMotion {
    fn pose_at(&self, t: f64) -> Vector3<f64> {
        Vector3::new(
            spline::evaluate(&self.coeffs[0], t),
            spline::evaluate(&self.coeffs[1], t),
            spline::evaluate(&self.coeffs[2], t),
        )
    }

    fn max_linear_speed(&self, from: f64) -> f64 {
        let vx = max_abs_derivative(&self.coeffs[0], from);
        let vy = max_abs_derivative(&self.coeffs[1], from);
        (vx * vx + vy * vy).sqrt()
    }

    fn max_angular_speed(&self, from: f64) -> f64 {
        max_abs_derivative(&self.coeffs[2], from)
    }
}

/// A motion that never moves: a region fixed in space.
#[derive(Debug, Clone)]
pub struct StaticMotion {
    pose: Vector3<f64>,
}

impl StaticMotion {
    /// Fix the motion at `pose`.
    pub fn new(pose: Vector3<f64>) -> Self {
        Self { pose }
    }
}

impl Motion for StaticMotion {
    #[inline]
    fn pose_at(&self, _t: f64) -> Vector3<f64> {
        self.pose
    }

    #[inline]
    fn max_linear_speed(&self, _from: f64) -> f64 {
        0.0
    }

    #[inline]
    fn max_angular_speed(&self, _from: f64) -> f64 {
        0.0
    }
}
