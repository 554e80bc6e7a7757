//! # Marga-Traffic: Conflict Detection for Multi-Robot Traffic
//!
//! Core library of the marga traffic management stack. Given two planned
//! robot motions, each a time-parameterized sequence of cubic spline
//! segments with convex footprints attached, it determines whether the
//! motions ever collide and, if so, the earliest time at which they do.
//! Detection is continuous: contact times come from a conservative
//! advancement solver over the spline motions, not from sampling poses.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_traffic::detect::{self, Interpolation};
//! use marga_traffic::geometry::ConvexShape;
//! use marga_traffic::{Profile, Time, Trajectory};
//! use nalgebra::Vector3;
//!
//! let profile = Profile::new().with_footprint(
//!     ConvexShape::Circle { radius: 0.5 }.finalize(),
//! );
//!
//! // Two robots driving straight at each other.
//! let mut a = Trajectory::new();
//! a.insert(Time::ZERO, Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
//! a.insert(Time::from_secs_f64(10.0), Vector3::new(10.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
//!
//! let mut b = Trajectory::new();
//! b.insert(Time::ZERO, Vector3::new(10.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
//! b.insert(Time::from_secs_f64(10.0), Vector3::new(0.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
//!
//! let conflict = detect::between(&profile, &a, &profile, &b, Interpolation::CubicSpline)
//!     .expect("valid trajectories");
//! assert!(conflict.is_some());
//! ```
//!
//! ## Architecture
//!
//! The crate is layered bottom-up:
//!
//! - [`time`]: nanosecond instants and durations
//! - [`geometry`]: convex shapes, bounding boxes, GJK distance
//! - [`trajectory`]: ordered waypoint sequences
//! - [`spline`]: cubic Hermite segments and closed-form extrema
//! - [`motion`]: windowed spline and static motions for the solver
//! - [`ccd`]: conservative-advancement continuous collision
//! - [`profile`]: footprint/vicinity pairs
//! - [`detect`]: the invasion, approach and region detectors
//! - [`reservations`]: waypoint time-slot bookkeeping
//!
//! ## Data Flow
//!
//! ```text
//!  shapes + spline coefficients
//!          │
//!          ▼
//!  bounding boxes ── profiles ──► bounded profile (per segment)
//!          │                              │
//!          ▼                              ▼
//!  conservative advancement ◄──── invasion detector ◄── detect::between
//!                                         ▲
//!                                approach detector
//! ```
//!
//! Detection is synchronous and single-threaded per call; inputs are
//! read-only and results either come back by value or land in a
//! caller-provided buffer. Independent trajectory pairs can be checked
//! from as many threads as desired.

pub mod ccd;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod profile;
pub mod reservations;
pub mod spline;
pub mod time;
pub mod trajectory;

pub use error::{MargaError, Result};
pub use profile::Profile;
pub use time::{Duration, Time};
pub use trajectory::{Trajectory, Waypoint};
