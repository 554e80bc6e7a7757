//! Trajectory-versus-region scenarios.

use marga_traffic::detect::{self, Conflict, SpacetimeRegion};
use marga_traffic::geometry::{ConvexShape, FinalShape};
use marga_traffic::{MargaError, Profile, Time, Trajectory};
use nalgebra::Vector3;

fn vicinity_profile(radius: f64) -> Profile {
    Profile::new().with_footprint(ConvexShape::Circle { radius }.finalize())
}

/// Constant-velocity drive along x from `(0, 0)` to `(10, 0)` over 10 s.
fn straight_drive() -> Trajectory {
    let mut trajectory = Trajectory::new();
    trajectory.insert(
        Time::from_secs_f64(0.0),
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
    );
    trajectory.insert(
        Time::from_secs_f64(10.0),
        Vector3::new(10.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
    );
    trajectory
}

fn square_at(x: f64, y: f64, lower: Option<f64>, upper: Option<f64>) -> SpacetimeRegion {
    SpacetimeRegion {
        pose: Vector3::new(x, y, 0.0),
        shape: FinalShape::from(
            ConvexShape::Box {
                width: 2.0,
                depth: 2.0,
            }
            .finalize(),
        ),
        lower_time_bound: lower.map(Time::from_secs_f64),
        upper_time_bound: upper.map(Time::from_secs_f64),
    }
}

#[test]
fn crossing_a_bounded_region_conflicts_once() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    let region = square_at(5.0, 0.0, Some(2.0), Some(8.0));

    let mut conflicts: Vec<Conflict> = Vec::new();
    let hit = detect::region_conflicts(&profile, &trajectory, &region, Some(&mut conflicts))
        .expect("valid trajectory");
    assert!(hit);
    assert_eq!(conflicts.len(), 1);

    // The circle reaches the box face at x = 4.0 when its center passes
    // x = 3.5, inside the [2, 8] window.
    let time = conflicts[0].time.as_secs_f64();
    assert!((time - 3.5).abs() < 0.01, "expected contact near 3.5s, got {time}");
    assert_eq!(conflicts[0].segment_a, conflicts[0].segment_b);
}

#[test]
fn unbounded_region_behaves_like_always_active() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    let region = square_at(5.0, 0.0, None, None);

    assert!(detect::region_conflicts(&profile, &trajectory, &region, None)
        .expect("valid trajectory"));
}

#[test]
fn window_clamps_the_contact_time() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    // The robot is already inside the region's reach when the window
    // opens, so the conflict lands right at the lower bound.
    let region = square_at(5.0, 0.0, Some(4.0), None);

    let mut conflicts: Vec<Conflict> = Vec::new();
    let hit = detect::region_conflicts(&profile, &trajectory, &region, Some(&mut conflicts))
        .expect("valid trajectory");
    assert!(hit);
    let time = conflicts[0].time.as_secs_f64();
    assert!((time - 4.0).abs() < 0.01, "expected contact at window open, got {time}");
}

#[test]
fn region_expiring_before_arrival_is_no_conflict() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    // Active only for the first second; the robot arrives at t = 3.5 s.
    let region = square_at(5.0, 0.0, None, Some(1.0));

    assert!(!detect::region_conflicts(&profile, &trajectory, &region, None)
        .expect("valid trajectory"));
}

#[test]
fn disjoint_time_windows_are_no_conflict() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    let region = square_at(5.0, 0.0, Some(20.0), Some(30.0));

    assert!(!detect::region_conflicts(&profile, &trajectory, &region, None)
        .expect("valid trajectory"));
}

#[test]
fn offset_region_out_of_reach_is_no_conflict() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    let region = square_at(5.0, 5.0, None, None);

    assert!(!detect::region_conflicts(&profile, &trajectory, &region, None)
        .expect("valid trajectory"));
}

#[test]
fn multi_component_region_checks_every_piece() {
    let profile = vicinity_profile(0.5);
    let trajectory = straight_drive();
    // One component far off the path, one on it.
    let region = SpacetimeRegion {
        pose: Vector3::new(5.0, 0.0, 0.0),
        shape: FinalShape::from_components(vec![
            ConvexShape::Circle { radius: 0.5 }.finalize(),
            ConvexShape::Polygon {
                vertices: vec![
                    nalgebra::Vector2::new(-1.0, 4.0),
                    nalgebra::Vector2::new(1.0, 4.0),
                    nalgebra::Vector2::new(0.0, 6.0),
                ],
            }
            .finalize(),
        ]),
        lower_time_bound: None,
        upper_time_bound: None,
    };

    let mut conflicts: Vec<Conflict> = Vec::new();
    let hit = detect::region_conflicts(&profile, &trajectory, &region, Some(&mut conflicts))
        .expect("valid trajectory");
    assert!(hit);
    // Only the on-path circle component produces a hit.
    assert_eq!(conflicts.len(), 1);
    let time = conflicts[0].time.as_secs_f64();
    assert!((time - 4.0).abs() < 0.01, "expected contact near 4.0s, got {time}");
}

#[test]
fn profile_without_shapes_never_conflicts_with_regions() {
    let trajectory = straight_drive();
    let region = square_at(5.0, 0.0, None, None);

    assert!(!detect::region_conflicts(&Profile::new(), &trajectory, &region, None)
        .expect("empty profiles are inert"));
}

#[test]
fn short_trajectory_is_rejected() {
    let profile = vicinity_profile(0.5);
    let mut short = Trajectory::new();
    short.insert(Time::ZERO, Vector3::zeros(), Vector3::zeros());
    let region = square_at(5.0, 0.0, None, None);

    let result = detect::region_conflicts(&profile, &short, &region, None);
    assert!(matches!(
        result,
        Err(MargaError::InvalidTrajectory { waypoints: 1, .. })
    ));
}
