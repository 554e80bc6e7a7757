//! Time-ordered waypoint sequences.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::time::Time;

/// A single trajectory element: where a robot is and how fast it is moving
/// at an absolute instant.
///
/// Position and velocity are `(x, y, θ)` vectors; θ is the heading in
/// radians and is interpolated as a plain scalar (callers hand in unwrapped
/// headings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Absolute time of this waypoint.
    pub time: Time,
    /// Pose `(x, y, θ)`.
    pub position: Vector3<f64>,
    /// Velocity `(ẋ, ẏ, θ̇)` in units per second.
    pub velocity: Vector3<f64>,
}

/// An ordered sequence of waypoints.
///
/// Motion between consecutive waypoints is a cubic Hermite spline that
/// interpolates both positions and velocities. A trajectory must hold at
/// least 2 waypoints before it can take part in conflict detection; the
/// container itself permits fewer so that it can be built up insert by
/// insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    /// Create an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a waypoint, keeping the sequence ordered by time.
    ///
    /// Inserting at a time that is already present replaces that waypoint.
    pub fn insert(
        &mut self,
        time: Time,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> &mut Self {
        let waypoint = Waypoint {
            time,
            position,
            velocity,
        };
        match self.waypoints.binary_search_by_key(&time, |w| w.time) {
            Ok(i) => self.waypoints[i] = waypoint,
            Err(i) => self.waypoints.insert(i, waypoint),
        }
        self
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the trajectory holds no waypoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Time of the first waypoint.
    #[inline]
    pub fn start_time(&self) -> Option<Time> {
        self.waypoints.first().map(|w| w.time)
    }

    /// Time of the last waypoint.
    #[inline]
    pub fn finish_time(&self) -> Option<Time> {
        self.waypoints.last().map(|w| w.time)
    }

    /// The waypoint sequence.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Index of the first waypoint whose time is `>= time`, or `len()` when
    /// there is none.
    ///
    /// For an in-range query time, the returned index identifies the
    /// segment that *ends* at the indexed waypoint, i.e. the segment the
    /// query time falls into.
    pub fn find(&self, time: Time) -> usize {
        self.waypoints.partition_point(|w| w.time < time)
    }
}
