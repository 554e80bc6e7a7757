//! Planar geometry for robot footprints.
//!
//! # Components
//!
//! - **Shapes**: convex primitives (circle, box, polygon) and their
//!   finalized, immutable forms
//! - **Bounding boxes**: axis-aligned boxes used to prune segment pairs
//!   before the continuous collision solver runs
//! - **GJK**: support-function distance queries between posed convex shapes
//!
//! Poses throughout this module are `(x, y, θ)` vectors: a translation in
//! the plane plus a counter-clockwise heading in radians.

mod bbox;
mod gjk;
mod shape;

pub use bbox::BoundingBox;
pub use gjk::{distance, intersect};
pub use shape::{ConvexShape, FinalConvexShape, FinalShape};
