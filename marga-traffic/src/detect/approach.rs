//! Detection for participants that start in close proximity.
//!
//! Two robots already inside each other's buffers are given the chance to
//! back away; a conflict arises only when they keep closing in while still
//! close. Once the close-proximity episode ends, the remaining motion is
//! handed back to the invasion detector.

use crate::ccd::CcdConfig;
use crate::error::Result;
use crate::profile::NormalizedProfile;
use crate::spline::Spline;
use crate::time::Time;
use crate::trajectory::{Trajectory, Waypoint};

use super::distance::DistanceDifferential;
use super::invasion::detect_invasion;
use super::{check_overlap, Conflict};

/// Cut a trajectory at `start_time`, synthesizing a waypoint there from the
/// current spline so the remainder keeps at least 2 waypoints.
fn slice_trajectory(start_time: Time, spline: &Spline, rest: &[Waypoint]) -> Trajectory {
    let mut output = Trajectory::new();
    output.insert(
        start_time,
        spline.position_at(start_time),
        spline.velocity_at(start_time),
    );
    for waypoint in rest {
        output.insert(waypoint.time, waypoint.position, waypoint.velocity);
    }
    output
}

/// Shift conflict segment indices from a sliced trajectory back onto the
/// trajectory it was cut from.
fn remap_sliced_conflicts(conflicts: &mut [Conflict], a_offset: usize, b_offset: usize) {
    for conflict in conflicts {
        conflict.segment_a += a_offset;
        conflict.segment_b += b_offset;
    }
}

/// Walk the close-proximity episode and report approach conflicts.
#[allow(clippy::too_many_arguments)]
pub(super) fn detect_approach(
    profile_a: &NormalizedProfile,
    trajectory_a: &Trajectory,
    mut a_it: usize,
    profile_b: &NormalizedProfile,
    trajectory_b: &Trajectory,
    mut b_it: usize,
    config: &CcdConfig,
    mut output: Option<&mut Vec<Conflict>>,
) -> Result<Option<Time>> {
    let a = trajectory_a.waypoints();
    let b = trajectory_b.waypoints();

    let mut spline_a: Option<Spline> = None;
    let mut spline_b: Option<Spline> = None;

    while a_it < a.len() && b_it < b.len() {
        let sa = spline_a.get_or_insert_with(|| Spline::from_segment(&a[a_it - 1], &a[a_it]));
        let sb = spline_b.get_or_insert_with(|| Spline::from_segment(&b[b_it - 1], &b[b_it]));

        let differential = DistanceDifferential::new(sa, sb);

        if differential.initially_approaching() {
            let time = differential.start_time();
            match output.as_mut() {
                None => return Ok(Some(time)),
                Some(buffer) => buffer.push(Conflict {
                    segment_a: a_it,
                    segment_b: b_it,
                    time,
                }),
            }
        }

        for time in differential.approach_times() {
            if !check_overlap(profile_a, sa, profile_b, sb, time)? {
                // The close-proximity episode has ended; check the rest of
                // the motions for an ordinary invasion.
                let sliced_a = slice_trajectory(time, sa, &a[a_it..]);
                let sliced_b = slice_trajectory(time, sb, &b[b_it..]);

                let result = detect_invasion(
                    profile_a,
                    &sliced_a,
                    1,
                    profile_b,
                    &sliced_b,
                    1,
                    config,
                    output.as_mut().map(|buffer| &mut **buffer),
                )?;
                if let Some(buffer) = output {
                    remap_sliced_conflicts(buffer, a_it - 1, b_it - 1);
                }
                return Ok(result);
            }

            // Still inside each other's buffers and closing in again.
            match output.as_mut() {
                None => return Ok(Some(time)),
                Some(buffer) => buffer.push(Conflict {
                    segment_a: a_it,
                    segment_b: b_it,
                    time,
                }),
            }
        }

        let still_close = check_overlap(
            profile_a,
            sa,
            profile_b,
            sb,
            differential.finish_time(),
        )?;

        let a_finish = sa.finish_time();
        let b_finish = sb.finish_time();
        if a_finish < b_finish {
            spline_a = None;
            a_it += 1;
        } else if b_finish < a_finish {
            spline_b = None;
            b_it += 1;
        } else {
            spline_a = None;
            a_it += 1;
            spline_b = None;
            b_it += 1;
        }

        if !still_close {
            return detect_invasion(
                profile_a,
                trajectory_a,
                a_it,
                profile_b,
                trajectory_b,
                b_it,
                config,
                output,
            );
        }
    }

    match output {
        None => Ok(None),
        Some(buffer) => Ok(buffer.iter().map(|conflict| conflict.time).min()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_slice_synthesizes_matching_waypoint() {
        let start = Waypoint {
            time: Time::from_secs_f64(0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
            velocity: Vector3::new(1.0, 0.0, 0.0),
        };
        let finish = Waypoint {
            time: Time::from_secs_f64(10.0),
            position: Vector3::new(10.0, 0.0, 0.0),
            velocity: Vector3::new(1.0, 0.0, 0.0),
        };
        let spline = Spline::from_segment(&start, &finish);

        let sliced = slice_trajectory(Time::from_secs_f64(4.0), &spline, &[finish.clone()]);
        assert_eq!(sliced.len(), 2);
        let head = &sliced.waypoints()[0];
        assert_eq!(head.time, Time::from_secs_f64(4.0));
        assert_relative_eq!(head.position.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(head.velocity.x, 1.0, epsilon = 1e-9);
        assert_eq!(sliced.waypoints()[1], finish);
    }

    #[test]
    fn test_remap_restores_original_indices() {
        let mut conflicts = vec![Conflict {
            segment_a: 1,
            segment_b: 2,
            time: Time::ZERO,
        }];
        remap_sliced_conflicts(&mut conflicts, 3, 1);
        assert_eq!(conflicts[0].segment_a, 4);
        assert_eq!(conflicts[0].segment_b, 3);
    }
}
