//! Time-slot reservations on graph waypoints.
//!
//! A participant can hold a waypoint for a window of time, either finite
//! or open-ended. The system keeps one ordered schedule per waypoint and
//! refuses windows that would overlap an existing hold: a finite hold
//! blocks its `[start, start + duration)` window, an open-ended hold
//! blocks everything from its start onward.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound::{Excluded, Unbounded};

use serde::{Deserialize, Serialize};

use crate::error::{MargaError, Result};
use crate::time::{Duration, Time};

/// Identifies the robot making a reservation.
pub type ParticipantId = u64;

/// Index of a waypoint in the navigation graph.
pub type WaypointId = usize;

/// A granted hold on a waypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: u64,
    participant: ParticipantId,
    waypoint: WaypointId,
    time: Time,
    duration: Option<Duration>,
}

impl Reservation {
    /// Unique id of this reservation.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The participant holding the reservation.
    #[inline]
    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    /// The reserved waypoint.
    #[inline]
    pub fn waypoint(&self) -> WaypointId {
        self.waypoint
    }

    /// Start of the hold.
    #[inline]
    pub fn time(&self) -> Time {
        self.time
    }

    /// Length of the hold; `None` means open-ended.
    #[inline]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

/// Bookkeeping for waypoint time-slot reservations.
#[derive(Debug, Default)]
pub struct ReservationSystem {
    /// Per-waypoint schedule, ordered by hold start time.
    schedule: HashMap<WaypointId, BTreeMap<Time, Reservation>>,
    /// Reservation id to its schedule slot.
    reservations: HashMap<u64, (WaypointId, Time)>,
    /// Reservation ids held by each participant.
    by_participant: HashMap<ParticipantId, HashSet<u64>>,
    counter: u64,
}

impl ReservationSystem {
    /// Create an empty reservation system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to reserve one of the candidate waypoints at `time`.
    ///
    /// An omitted duration reserves the waypoint indefinitely. Among the
    /// candidates whose window is free, the last one wins; `None` when no
    /// candidate is free.
    pub fn reserve(
        &mut self,
        participant: ParticipantId,
        time: Time,
        waypoints: &[WaypointId],
        duration: Option<Duration>,
    ) -> Option<Reservation> {
        let mut chosen = None;
        for &waypoint in waypoints {
            if self.is_free(waypoint, time, duration) {
                chosen = Some(waypoint);
            }
        }

        let waypoint = chosen?;
        let reservation = Reservation {
            id: self.counter,
            participant,
            waypoint,
            time,
            duration,
        };
        self.counter += 1;

        self.schedule
            .entry(waypoint)
            .or_default()
            .insert(time, reservation.clone());
        self.reservations
            .insert(reservation.id, (waypoint, time));
        self.by_participant
            .entry(participant)
            .or_default()
            .insert(reservation.id);

        log::debug!(
            "participant {} reserved waypoint {} at {}",
            participant,
            waypoint,
            time
        );
        Some(reservation)
    }

    /// Release a previously granted reservation.
    ///
    /// Fails with [`MargaError::UnknownReservation`] when the id is not
    /// held, including after a double cancel.
    pub fn cancel(&mut self, reservation: &Reservation) -> Result<()> {
        let (waypoint, time) = self
            .reservations
            .remove(&reservation.id)
            .ok_or(MargaError::UnknownReservation {
                id: reservation.id,
            })?;

        if let Some(slots) = self.schedule.get_mut(&waypoint) {
            slots.remove(&time);
        }
        if let Some(held) = self.by_participant.get_mut(&reservation.participant) {
            held.remove(&reservation.id);
        }
        Ok(())
    }

    /// Whether `waypoint` is free for a hold starting at `start`.
    fn is_free(&self, waypoint: WaypointId, start: Time, duration: Option<Duration>) -> bool {
        let slots = match self.schedule.get(&waypoint) {
            Some(slots) => slots,
            None => return true,
        };

        // A later hold inside the requested window rules it out; for an
        // open-ended request, any later hold does.
        let blocked_by_later = match duration {
            Some(duration) => {
                let end = start + duration;
                slots.range((Excluded(start), Excluded(end))).next().is_some()
            }
            None => slots.range((Excluded(start), Unbounded)).next().is_some(),
        };
        if blocked_by_later {
            return false;
        }

        // Otherwise only the latest hold at or before the start matters.
        match slots.range(..=start).next_back() {
            None => true,
            Some((slot_start, previous)) => match previous.duration {
                // An open-ended hold never releases the waypoint.
                None => false,
                Some(held) => *slot_start + held <= start,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(h: f64) -> Duration {
        Duration::from_secs_f64(h * 3600.0)
    }

    fn at(h: f64) -> Time {
        Time::from_secs_f64(h * 3600.0)
    }

    #[test]
    fn test_reserve_on_empty_system() {
        let mut system = ReservationSystem::new();
        let open_ended = system.reserve(0, at(1.0), &[0, 1], None);
        assert!(open_ended.is_some());

        let mut system = ReservationSystem::new();
        let finite = system.reserve(0, at(1.0), &[0, 1], Some(hours(1.0)));
        assert!(finite.is_some());
    }

    #[test]
    fn test_last_free_candidate_wins() {
        let mut system = ReservationSystem::new();
        let first = system
            .reserve(0, at(10.0), &[0, 1], Some(hours(2.0)))
            .expect("both candidates free");
        assert_eq!(first.waypoint(), 1);

        let second = system
            .reserve(0, at(10.0), &[0, 1], Some(hours(2.0)))
            .expect("waypoint 0 still free");
        assert_eq!(second.waypoint(), 0);

        let third = system.reserve(0, at(10.0), &[0, 1], Some(hours(2.0)));
        assert!(third.is_none());
    }

    #[test]
    fn test_open_ended_reservation_blocks_waypoint() {
        let mut system = ReservationSystem::new();
        system.reserve(0, at(10.0), &[0], None);

        // No open-ended hold may start before an existing one.
        assert!(system.reserve(1, at(5.0), &[0], None).is_none());
        // Nothing may start after it either.
        assert!(system.reserve(1, at(15.0), &[0], Some(hours(2.0))).is_none());
        // A finite hold that ends before it starts is fine.
        assert!(system.reserve(1, at(5.0), &[0], Some(hours(2.0))).is_some());
        // But not one that runs into it.
        assert!(system.reserve(1, at(6.0), &[0], Some(hours(7.0))).is_none());
    }

    #[test]
    fn test_finite_reservation_windows() {
        let mut system = ReservationSystem::new();
        system.reserve(0, at(10.0), &[0], Some(hours(2.0)));

        // Exactly after the hold ends is allowed, even open-ended.
        assert!(system.reserve(1, at(12.0), &[0], None).is_some());

        let mut system = ReservationSystem::new();
        system.reserve(0, at(10.0), &[0], Some(hours(2.0)));

        assert!(system.reserve(1, at(8.0), &[0], None).is_none());
        assert!(system.reserve(1, at(8.0), &[0], Some(hours(3.0))).is_none());
        assert!(system.reserve(1, at(8.0), &[0], Some(hours(7.0))).is_none());
        assert!(system.reserve(1, at(10.0), &[0], Some(hours(2.0))).is_none());
        assert!(system.reserve(1, at(8.0), &[0], Some(hours(2.0))).is_some());
    }

    #[test]
    fn test_cancel_releases_the_slot() {
        let mut system = ReservationSystem::new();
        let held = system
            .reserve(0, at(10.0), &[0], None)
            .expect("empty system");
        assert!(system.reserve(1, at(12.0), &[0], Some(hours(1.0))).is_none());

        system.cancel(&held).expect("reservation is held");
        assert!(system.reserve(1, at(12.0), &[0], Some(hours(1.0))).is_some());
    }

    #[test]
    fn test_cancel_unknown_reservation_fails() {
        let mut system = ReservationSystem::new();
        let held = system
            .reserve(7, at(1.0), &[3], Some(hours(1.0)))
            .expect("empty system");
        system.cancel(&held).expect("first cancel succeeds");

        let err = system.cancel(&held).expect_err("second cancel must fail");
        assert_eq!(err, MargaError::UnknownReservation { id: held.id() });
    }
}
