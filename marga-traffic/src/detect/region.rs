//! Trajectory-versus-region conflict detection.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::ccd::{self, CcdConfig};
use crate::error::{MargaError, Result};
use crate::geometry::FinalShape;
use crate::motion::{SplineMotion, StaticMotion};
use crate::profile::Profile;
use crate::spline::Spline;
use crate::time::Time;
use crate::trajectory::Trajectory;

use super::{compute_time, Conflict};

/// A region fixed in space and constrained to a (possibly half-open) time
/// window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacetimeRegion {
    /// Pose `(x, y, θ)` of the region's shape.
    pub pose: Vector3<f64>,
    /// The region's shape; may be a union of convex components.
    pub shape: FinalShape,
    /// Earliest instant at which the region is active, if bounded below.
    pub lower_time_bound: Option<Time>,
    /// Latest instant at which the region is active, if bounded above.
    pub upper_time_bound: Option<Time>,
}

/// Check a trajectory against a static spacetime region.
///
/// Only the profile's vicinity participates; a profile without one never
/// conflicts with a region. Without a buffer the function returns on the
/// first hit; with a buffer it records every hit (segment indices repeat
/// the trajectory segment on both sides) and reports whether any were
/// found.
pub fn region_conflicts(
    profile: &Profile,
    trajectory: &Trajectory,
    region: &SpacetimeRegion,
    mut output: Option<&mut Vec<Conflict>>,
) -> Result<bool> {
    if trajectory.len() < 2 {
        return Err(MargaError::InvalidTrajectory {
            waypoints: trajectory.len(),
            site: "detect::region_conflicts",
        });
    }

    let profile = profile.normalized();
    let vicinity = match profile.vicinity.as_deref() {
        Some(shape) => shape,
        None => return Ok(false),
    };

    let waypoints = trajectory.waypoints();
    let trajectory_start = waypoints[0].time;
    let trajectory_finish = waypoints[waypoints.len() - 1].time;

    let start_time = region
        .lower_time_bound
        .map_or(trajectory_start, |bound| bound.max(trajectory_start));
    let finish_time = region
        .upper_time_bound
        .map_or(trajectory_finish, |bound| bound.min(trajectory_finish));

    if finish_time < start_time {
        // The region's window and the trajectory never coexist.
        return Ok(false);
    }

    let begin_it = if trajectory_start < start_time {
        trajectory.find(start_time)
    } else {
        1
    };
    let end_it = if finish_time < trajectory_finish {
        trajectory.find(finish_time) + 1
    } else {
        waypoints.len()
    };

    let mut motion = SplineMotion::default();
    let region_motion = StaticMotion::new(region.pose);
    let config = CcdConfig::default();

    if let Some(buffer) = output.as_mut() {
        buffer.clear();
    }

    for it in begin_it..end_it {
        let spline = Spline::from_segment(&waypoints[it - 1], &waypoints[it]);
        let window_start = spline.start_time().max(start_time);
        let window_finish = spline.finish_time().min(finish_time);
        motion.update(&spline, window_start, window_finish);

        for component in region.shape.components() {
            if let Some(contact) =
                ccd::earliest_contact(vicinity, &motion, component, &region_motion, &config)
            {
                match output.as_mut() {
                    None => return Ok(true),
                    Some(buffer) => buffer.push(Conflict {
                        segment_a: it,
                        segment_b: it,
                        time: compute_time(contact, window_start, window_finish),
                    }),
                }
            }
        }
    }

    Ok(output.is_some_and(|buffer| !buffer.is_empty()))
}
