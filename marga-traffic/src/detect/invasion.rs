//! Detection of one participant invading the other's vicinity.

use crate::ccd::{self, CcdConfig};
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::motion::SplineMotion;
use crate::profile::NormalizedProfile;
use crate::spline::Spline;
use crate::time::Time;
use crate::trajectory::Trajectory;

use super::{compute_time, Conflict};

/// Segment-local bounding boxes for one participant, inflated per shape.
struct BoundingProfile {
    footprint: BoundingBox,
    vicinity: BoundingBox,
}

/// Boxes around the windowed motion, inflated by each shape's
/// characteristic length. An absent shape gets the void box so it prunes
/// every pairing it is part of.
fn bounding_profile(motion: &SplineMotion, profile: &NormalizedProfile) -> BoundingProfile {
    let base = motion.bounding_box();
    BoundingProfile {
        footprint: profile
            .footprint
            .as_ref()
            .map(|s| base.inflated(s.characteristic_length()))
            .unwrap_or_else(BoundingBox::void),
        vicinity: profile
            .vicinity
            .as_ref()
            .map(|s| base.inflated(s.characteristic_length()))
            .unwrap_or_else(BoundingBox::void),
    }
}

/// Walk both trajectories in lockstep and find footprint-into-vicinity
/// contacts.
///
/// Cursors point at the terminating waypoint of the current segment. With
/// no output buffer the first contact returns immediately; with a buffer
/// every contact is recorded and the earliest recorded time is returned.
#[allow(clippy::too_many_arguments)]
pub(super) fn detect_invasion(
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

    // Rewritten per segment pair instead of rebuilt, so the walk allocates
    // nothing.
    let mut motion_a = SplineMotion::default();
    let mut motion_b = SplineMotion::default();

    // When both profiles use one shape for footprint and vicinity, the
    // swapped pairing would repeat the same test.
    let test_complement = profile_a.is_asymmetric() || profile_b.is_asymmetric();

    if let Some(buffer) = output.as_mut() {
        buffer.clear();
    }

    while a_it < a.len() && b_it < b.len() {
        let sa = spline_a.get_or_insert_with(|| Spline::from_segment(&a[a_it - 1], &a[a_it]));
        let sb = spline_b.get_or_insert_with(|| Spline::from_segment(&b[b_it - 1], &b[b_it]));

        let start_time = sa.start_time().max(sb.start_time());
        let finish_time = sa.finish_time().min(sb.finish_time());

        motion_a.update(sa, start_time, finish_time);
        motion_b.update(sb, start_time, finish_time);

        let bound_a = bounding_profile(&motion_a, profile_a);
        let bound_b = bounding_profile(&motion_b, profile_b);

        if bound_a.footprint.overlaps(&bound_b.vicinity) {
            if let (Some(footprint_a), Some(vicinity_b)) =
                (profile_a.footprint.as_deref(), profile_b.vicinity.as_deref())
            {
                if let Some(contact) =
                    ccd::earliest_contact(footprint_a, &motion_a, vicinity_b, &motion_b, config)
                {
                    let time = compute_time(contact, start_time, finish_time);
                    match output.as_mut() {
                        None => return Ok(Some(time)),
                        Some(buffer) => buffer.push(Conflict {
                            segment_a: a_it,
                            segment_b: b_it,
                            time,
                        }),
                    }
                }
            }
        }

        if test_complement && bound_a.vicinity.overlaps(&bound_b.footprint) {
            if let (Some(vicinity_a), Some(footprint_b)) =
                (profile_a.vicinity.as_deref(), profile_b.footprint.as_deref())
            {
                if let Some(contact) =
                    ccd::earliest_contact(vicinity_a, &motion_a, footprint_b, &motion_b, config)
                {
                    let time = compute_time(contact, start_time, finish_time);
                    match output.as_mut() {
                        None => return Ok(Some(time)),
                        Some(buffer) => buffer.push(Conflict {
                            segment_a: a_it,
                            segment_b: b_it,
                            time,
                        }),
                    }
                }
            }
        }

        let a_finish = sa.finish_time();
        let b_finish = sb.finish_time();

        // Advance whichever segment finishes first; both on a tie, or the
        // finished pair would be tested again.
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
    }

    match output {
        None => Ok(None),
        // Both pairings of one segment pair can record out of time order,
        // so take the minimum rather than the first entry.
        Some(buffer) => Ok(buffer.iter().map(|conflict| conflict.time).min()),
    }
}
