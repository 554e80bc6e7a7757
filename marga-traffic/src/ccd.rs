//! Continuous collision by conservative advancement.
//!
//! Given two convex shapes carried by [`Motion`]s over a shared parametric
//! interval, the solver alternates between a distance query and a bound on
//! how fast that distance can close, stepping the interval parameter
//! forward by the quotient. Contact is proven when the certified distance
//! drops below tolerance; absence of contact is proven when the parameter
//! leaves the interval.

use serde::Deserialize;

use crate::geometry::{self, FinalConvexShape};
use crate::motion::Motion;

/// Tuning knobs for the conservative-advancement solver.
#[derive(Debug, Clone, Deserialize)]
pub struct CcdConfig {
    /// Separation below which the shapes count as touching (meters).
    pub distance_tolerance: f64,
    /// Advancement steps before the solver gives up on convergence.
    pub max_iterations: usize,
}

impl Default for CcdConfig {
    fn default() -> Self {
        Self {
            distance_tolerance: 1e-4,
            max_iterations: 64,
        }
    }
}

/// Earliest parametric contact time in `[0, 1]` between two moving convex
/// shapes, or `None` when they stay separated over the whole interval.
///
/// The rotational term of the closing-speed bound uses each shape's
/// characteristic length, so a spinning shape is covered by its
/// circumscribing circle. Grazing contact right at the tolerance is
/// reported or missed depending on rounding; callers must not rely on
/// either outcome.
pub fn earliest_contact<A: Motion, B: Motion>(
    shape_a: &FinalConvexShape,
    motion_a: &A,
    shape_b: &FinalConvexShape,
    motion_b: &B,
    config: &CcdConfig,
) -> Option<f64> {
    let mut t = 0.0;

    for _ in 0..config.max_iterations {
        let pose_a = motion_a.pose_at(t);
        let pose_b = motion_b.pose_at(t);
        let dist = geometry::distance(shape_a.shape(), &pose_a, shape_b.shape(), &pose_b);
        if dist <= config.distance_tolerance {
            return Some(t);
        }

        let closing_bound = motion_a.max_linear_speed(t)
            + motion_a.max_angular_speed(t) * shape_a.characteristic_length()
            + motion_b.max_linear_speed(t)
            + motion_b.max_angular_speed(t) * shape_b.characteristic_length();
        if closing_bound <= f64::EPSILON {
            // Nothing moves for the rest of the interval.
            return None;
        }

        t += dist / closing_bound;
        if t > 1.0 {
            return None;
        }
    }

    log::debug!(
        "conservative advancement did not converge within {} iterations",
        config.max_iterations
    );
    None
}
