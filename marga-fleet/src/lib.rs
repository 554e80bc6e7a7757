//! # Marga-Fleet: Fleet-Side AGV Bookkeeping
//!
//! Value types the fleet layer shares with planners built on top of
//! [`marga_traffic`]. Currently this is the per-robot [`agv::State`]
//! record: where a robot will be when its current work finishes, and how
//! much battery it will have left.

pub mod agv;

pub use agv::State;
