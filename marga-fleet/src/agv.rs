//! AGV state records.

use marga_traffic::Time;
use serde::{Deserialize, Serialize};

/// The projected state of an AGV at the end of its current assignment.
///
/// A plain value type: getters borrow, setters mutate in place and return
/// `&mut Self` so updates chain.
///
/// # Example
///
/// ```rust
/// use marga_fleet::State;
/// use marga_traffic::Time;
///
/// let mut state = State::default();
/// state
///     .set_waypoint(12)
///     .set_battery_soc(0.83)
///     .set_finish_time(Time::from_secs_f64(42.0));
/// assert_eq!(state.waypoint(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    waypoint: usize,
    charging_waypoint: usize,
    finish_time: Time,
    battery_soc: f64,
    threshold_soc: f64,
}

impl State {
    /// Create a fully specified state.
    pub fn new(
        waypoint: usize,
        charging_waypoint: usize,
        finish_time: Time,
        battery_soc: f64,
        threshold_soc: f64,
    ) -> Self {
        Self {
            waypoint,
            charging_waypoint,
            finish_time,
            battery_soc,
            threshold_soc,
        }
    }

    /// Waypoint the robot will occupy when it finishes.
    #[inline]
    pub fn waypoint(&self) -> usize {
        self.waypoint
    }

    /// Set the finishing waypoint.
    pub fn set_waypoint(&mut self, waypoint: usize) -> &mut Self {
        self.waypoint = waypoint;
        self
    }

    /// The robot's dedicated charging waypoint.
    #[inline]
    pub fn charging_waypoint(&self) -> usize {
        self.charging_waypoint
    }

    /// Set the charging waypoint.
    pub fn set_charging_waypoint(&mut self, charging_waypoint: usize) -> &mut Self {
        self.charging_waypoint = charging_waypoint;
        self
    }

    /// When the current assignment finishes.
    #[inline]
    pub fn finish_time(&self) -> Time {
        self.finish_time
    }

    /// Set the finish time.
    pub fn set_finish_time(&mut self, finish_time: Time) -> &mut Self {
        self.finish_time = finish_time;
        self
    }

    /// Battery state of charge in `[0, 1]` at the finish time.
    #[inline]
    pub fn battery_soc(&self) -> f64 {
        self.battery_soc
    }

    /// Set the battery state of charge.
    pub fn set_battery_soc(&mut self, battery_soc: f64) -> &mut Self {
        self.battery_soc = battery_soc;
        self
    }

    /// State of charge below which the robot must recharge.
    #[inline]
    pub fn threshold_soc(&self) -> f64 {
        self.threshold_soc
    }

    /// Set the recharge threshold.
    pub fn set_threshold_soc(&mut self, threshold_soc: f64) -> &mut Self {
        self.threshold_soc = threshold_soc;
        self
    }
}

impl Default for State {
    /// Both waypoints at 0, finish time "now", and an empty battery.
    fn default() -> Self {
        Self::new(0, 0, Time::now(), 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_state() {
        let state = State::default();
        assert_eq!(state.waypoint(), 0);
        assert_eq!(state.charging_waypoint(), 0);
        assert_relative_eq!(state.battery_soc(), 0.0);
        assert_relative_eq!(state.threshold_soc(), 0.0);
    }

    #[test]
    fn test_chained_setters() {
        let mut state = State::default();
        state
            .set_waypoint(3)
            .set_charging_waypoint(9)
            .set_battery_soc(0.5)
            .set_threshold_soc(0.2)
            .set_finish_time(Time::from_secs_f64(100.0));

        assert_eq!(state.waypoint(), 3);
        assert_eq!(state.charging_waypoint(), 9);
        assert_relative_eq!(state.battery_soc(), 0.5);
        assert_relative_eq!(state.threshold_soc(), 0.2);
        assert_eq!(state.finish_time(), Time::from_secs_f64(100.0));
    }
}
