//! Error types for the traffic core.

use thiserror::Error;

use crate::time::Time;

/// Errors surfaced at the public API boundary.
///
/// Numerical degeneracy inside the spline extrema solver is handled by
/// internal deadbands and never surfaces here; a collision solver that
/// finds no contact is the absence of a result, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MargaError {
    /// A trajectory was too short to be checked for conflicts.
    ///
    /// Trajectories need at least 2 waypoints so that at least one motion
    /// segment exists between them.
    #[error(
        "trajectory has {waypoints} waypoint(s); conflict checks need at least 2 (in {site})"
    )]
    InvalidTrajectory {
        /// Number of waypoints the offending trajectory had.
        waypoints: usize,
        /// The entry point that rejected the trajectory.
        site: &'static str,
    },

    /// A profile had no shape where a discrete collision evaluation needed
    /// one.
    #[error("profile has no shape for collision evaluation at {time}")]
    MissingShape {
        /// The instant at which the evaluation was attempted.
        time: Time,
    },

    /// Attempted to cancel a reservation the system does not know about.
    #[error("unknown reservation id {id}")]
    UnknownReservation {
        /// The id that was not found.
        id: u64,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MargaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_site() {
        let err = MargaError::InvalidTrajectory {
            waypoints: 1,
            site: "detect::between",
        };
        let text = err.to_string();
        assert!(text.contains("1 waypoint"));
        assert!(text.contains("detect::between"));
    }

    #[test]
    fn test_missing_shape_carries_time() {
        let err = MargaError::MissingShape {
            time: Time::from_nanos(42),
        };
        assert!(err.to_string().contains("42ns"));
    }
}
