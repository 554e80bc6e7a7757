//! Conflict detection between planned motions.
//!
//! Two planned motions conflict when one robot's footprint enters the
//! other's vicinity. Detection distinguishes two regimes:
//!
//! - **Invasion**: the participants start apart and one of them crosses
//!   into the other's buffer. Found by walking both trajectories segment
//!   pair by segment pair, pruning with bounding boxes and proving contact
//!   times with the continuous collision solver.
//! - **Approach**: the participants already start inside each other's
//!   buffers. Robots parked nose to nose are not in conflict just for
//!   being close; it becomes a conflict only if they keep closing in on
//!   each other while still close. Handled by the distance differential.
//!
//! ```text
//!                  ┌─────────────────┐
//!                  │  APART          │── segment pair not close ──► invasion
//!                  └───────┬─────────┘
//!                          │ close at segment start
//!                          ▼
//!                  ┌─────────────────┐
//!     approaching? │  CLOSE          │── re-approach in overlap ──► conflict
//!                  └───────┬─────────┘
//!                          │ no longer close at segment finish
//!                          ▼
//!                      invasion (remainder)
//! ```
//!
//! A third entry point checks one trajectory against a region fixed in
//! space and bounded in time.

mod approach;
mod distance;
mod invasion;
mod region;

use serde::{Deserialize, Serialize};

use crate::ccd::CcdConfig;
use crate::error::{MargaError, Result};
use crate::geometry;
use crate::profile::{NormalizedProfile, Profile};
use crate::spline::Spline;
use crate::time::Time;
use crate::trajectory::Trajectory;

pub use region::{region_conflicts, SpacetimeRegion};

/// How trajectory waypoints are interpolated.
///
/// Accepted by the entry points for forward compatibility; cubic splines
/// are currently the only interpolation, so the value is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Cubic Hermite splines between waypoints.
    #[default]
    CubicSpline,
}

/// One detected conflict.
///
/// Segments are identified by the index of their terminating waypoint in
/// the trajectory they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Segment of the first trajectory containing the contact.
    pub segment_a: usize,
    /// Segment of the second trajectory containing the contact.
    pub segment_b: usize,
    /// Absolute time of the contact.
    pub time: Time,
}

/// Check two planned motions for conflict.
///
/// Returns the earliest conflict time, or `None` when the motions never
/// conflict. Errors when either trajectory has fewer than 2 waypoints or a
/// needed shape is missing during a close-proximity evaluation. A
/// participant without any shapes is inert: the result is silently `None`.
pub fn between(
    profile_a: &Profile,
    trajectory_a: &Trajectory,
    profile_b: &Profile,
    trajectory_b: &Trajectory,
    _interpolation: Interpolation,
) -> Result<Option<Time>> {
    between_impl(profile_a, trajectory_a, profile_b, trajectory_b, None)
}

/// Like [`between`], but collects every conflict into `conflicts` in
/// discovery order (non-decreasing segment-pair start time).
///
/// The buffer is cleared first. The returned time is the earliest among
/// the recorded conflicts.
pub fn between_all(
    profile_a: &Profile,
    trajectory_a: &Trajectory,
    profile_b: &Profile,
    trajectory_b: &Trajectory,
    _interpolation: Interpolation,
    conflicts: &mut Vec<Conflict>,
) -> Result<Option<Time>> {
    conflicts.clear();
    between_impl(
        profile_a,
        trajectory_a,
        profile_b,
        trajectory_b,
        Some(conflicts),
    )
}

fn between_impl(
    profile_a: &Profile,
    trajectory_a: &Trajectory,
    profile_b: &Profile,
    trajectory_b: &Trajectory,
    output: Option<&mut Vec<Conflict>>,
) -> Result<Option<Time>> {
    if trajectory_a.len() < 2 {
        return Err(MargaError::InvalidTrajectory {
            waypoints: trajectory_a.len(),
            site: "detect::between",
        });
    }
    if trajectory_b.len() < 2 {
        return Err(MargaError::InvalidTrajectory {
            waypoints: trajectory_b.len(),
            site: "detect::between",
        });
    }

    let profile_a = profile_a.normalized();
    let profile_b = profile_b.normalized();

    // No footprints anywhere: nothing can collide with anything.
    if profile_a.footprint.is_none() && profile_b.footprint.is_none() {
        return Ok(None);
    }

    // After vicinity promotion, a missing vicinity means the whole profile
    // is empty; such a participant is deliberately skipped.
    if profile_a.vicinity.is_none() || profile_b.vicinity.is_none() {
        return Ok(None);
    }

    if !have_time_overlap(trajectory_a, trajectory_b) {
        return Ok(None);
    }

    let (a_it, b_it) = initial_cursors(trajectory_a, trajectory_b);

    let config = CcdConfig::default();
    if close_start(&profile_a, trajectory_a, a_it, &profile_b, trajectory_b, b_it)? {
        // Already inside each other's buffers: being close is not yet a
        // conflict, but getting closer is.
        log::debug!("trajectories start in close proximity, using approach detection");
        return approach::detect_approach(
            &profile_a,
            trajectory_a,
            a_it,
            &profile_b,
            trajectory_b,
            b_it,
            &config,
            output,
        );
    }

    invasion::detect_invasion(
        &profile_a,
        trajectory_a,
        a_it,
        &profile_b,
        trajectory_b,
        b_it,
        &config,
        output,
    )
}

/// Whether the trajectories share any time interval at all.
fn have_time_overlap(trajectory_a: &Trajectory, trajectory_b: &Trajectory) -> bool {
    let a = trajectory_a.waypoints();
    let b = trajectory_b.waypoints();

    if b[b.len() - 1].time < a[0].time {
        return false;
    }
    if a[a.len() - 1].time < b[0].time {
        return false;
    }
    true
}

/// Align the segment cursors so both start inside the shared time window.
///
/// Each cursor points at the terminating waypoint of its current segment.
fn initial_cursors(trajectory_a: &Trajectory, trajectory_b: &Trajectory) -> (usize, usize) {
    let t_a0 = trajectory_a.waypoints()[0].time;
    let t_b0 = trajectory_b.waypoints()[0].time;

    if t_a0 < t_b0 {
        // `a` starts first; skip ahead to where `b` begins.
        (trajectory_a.find(t_b0), 1)
    } else if t_b0 < t_a0 {
        (1, trajectory_b.find(t_a0))
    } else {
        (1, 1)
    }
}

/// Discrete overlap test of both shape pairings at one instant.
///
/// Checks `(footprint_a, vicinity_b)` and `(vicinity_a, footprint_b)`. A
/// pairing whose shape is missing is a fatal input error; the silent-skip
/// cases were already resolved during normalization.
pub(crate) fn check_overlap(
    profile_a: &NormalizedProfile,
    spline_a: &Spline,
    profile_b: &NormalizedProfile,
    spline_b: &Spline,
    time: Time,
) -> Result<bool> {
    let pairs = [
        (&profile_a.footprint, &profile_b.vicinity),
        (&profile_a.vicinity, &profile_b.footprint),
    ];

    let pose_a = spline_a.position_at(time);
    let pose_b = spline_b.position_at(time);

    for (shape_a, shape_b) in pairs {
        let shape_a = shape_a
            .as_deref()
            .ok_or(MargaError::MissingShape { time })?;
        let shape_b = shape_b
            .as_deref()
            .ok_or(MargaError::MissingShape { time })?;
        if geometry::intersect(shape_a.shape(), &pose_a, shape_b.shape(), &pose_b) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether the two motions begin inside each other's buffers.
fn close_start(
    profile_a: &NormalizedProfile,
    trajectory_a: &Trajectory,
    a_it: usize,
    profile_b: &NormalizedProfile,
    trajectory_b: &Trajectory,
    b_it: usize,
) -> Result<bool> {
    let a = trajectory_a.waypoints();
    let b = trajectory_b.waypoints();
    let spline_a = Spline::from_segment(&a[a_it - 1], &a[a_it]);
    let spline_b = Spline::from_segment(&b[b_it - 1], &b[b_it]);
    let start_time = spline_a.start_time().max(spline_b.start_time());

    check_overlap(profile_a, &spline_a, profile_b, &spline_b, start_time)
}

/// Map a parametric contact time back onto its absolute window.
pub(crate) fn compute_time(scaled_time: f64, start_time: Time, finish_time: Time) -> Time {
    start_time + (finish_time - start_time).scale(scaled_time)
}
