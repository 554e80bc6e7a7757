//! Closure-rate analysis between two splines.
//!
//! Over the shared window of two segments, the planar relative motion
//! `p(t) = p_a(t) − p_b(t)` is itself a cubic. The sign of
//! `d/dt ‖p‖² = 2·p·v` tells whether the participants are closing in
//! (negative) or receding (positive); the product of a cubic and its
//! quadratic derivative makes the rate a quintic, whose sign changes are
//! located numerically.

use crate::motion::SplineMotion;
use crate::spline::Spline;
use crate::time::Time;

use super::compute_time;

/// Samples used to bracket sign changes of the closure rate.
///
/// A quintic has at most five real roots; sampling well above that
/// density before bisecting keeps brackets reliable without chasing exact
/// root counts.
const SAMPLES: usize = 64;

/// Bisection refinements per bracketed sign change.
const REFINE_STEPS: usize = 48;

/// The closure rate of two splines over their common time window.
pub(super) struct DistanceDifferential {
    /// Coefficients of `p·v` by ascending power, degree 5.
    rate: [f64; 6],
    start_time: Time,
    finish_time: Time,
}

impl DistanceDifferential {
    /// Analyze the window shared by the two splines.
    pub fn new(spline_a: &Spline, spline_b: &Spline) -> Self {
        let start_time = spline_a.start_time().max(spline_b.start_time());
        let finish_time = spline_a.finish_time().min(spline_b.finish_time());

        let motion_a = SplineMotion::from_spline(spline_a, start_time, finish_time);
        let motion_b = SplineMotion::from_spline(spline_b, start_time, finish_time);

        let mut rate = [0.0; 6];
        for dim in 0..2 {
            let p: Vec<f64> = motion_a.coefficients()[dim]
                .iter()
                .zip(&motion_b.coefficients()[dim])
                .map(|(a, b)| a - b)
                .collect();
            let v = [p[1], 2.0 * p[2], 3.0 * p[3]];
            for (i, pi) in p.iter().enumerate() {
                for (j, vj) in v.iter().enumerate() {
                    rate[i + j] += pi * vj;
                }
            }
        }

        Self {
            rate,
            start_time,
            finish_time,
        }
    }

    /// Start of the shared window.
    #[inline]
    pub fn start_time(&self) -> Time {
        self.start_time
    }

    /// End of the shared window.
    #[inline]
    pub fn finish_time(&self) -> Time {
        self.finish_time
    }

    fn rate_at(&self, t: f64) -> f64 {
        let mut value = 0.0;
        for coeff in self.rate.iter().rev() {
            value = value * t + coeff;
        }
        value
    }

    /// Whether the participants are closing in at the window start.
    pub fn initially_approaching(&self) -> bool {
        self.rate_at(0.0) < 0.0
    }

    /// In-window instants at which closure flips from receding to
    /// approaching, in order.
    pub fn approach_times(&self) -> Vec<Time> {
        let mut times = Vec::new();
        let mut prev_t = 0.0;
        let mut prev_rate = self.rate_at(0.0);

        for i in 1..=SAMPLES {
            let t = i as f64 / SAMPLES as f64;
            let rate = self.rate_at(t);
            if prev_rate >= 0.0 && rate < 0.0 {
                // Bracketed a receding-to-approaching transition; bisect
                // onto the crossing.
                let mut lo = prev_t;
                let mut hi = t;
                for _ in 0..REFINE_STEPS {
                    let mid = 0.5 * (lo + hi);
                    if self.rate_at(mid) >= 0.0 {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                times.push(compute_time(hi, self.start_time, self.finish_time));
            }
            prev_t = t;
            prev_rate = rate;
        }

        times
    }
}
