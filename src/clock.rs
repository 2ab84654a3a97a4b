//! Fixed-interval tick scheduling.
//!
//! The clock never calls into the game itself. The owner polls it with the
//! current time and advances the simulation whenever a tick is due, which
//! keeps scheduling deterministic under test.

use std::time::{Duration, Instant};

use log::debug;

/// Scheduling state of a [`SimulationClock`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClockState {
    Stopped,
    Running {
        interval: Duration,
        next_tick_at: Instant,
    },
}

/// Periodic tick source with cancel-and-restart rescheduling.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: ClockState,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
        }
    }

    /// Starts ticking every `interval`, first tick one interval after `now`.
    ///
    /// Starting a running clock discards its pending deadline.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.state = ClockState::Running {
            interval,
            next_tick_at: now + interval,
        };
    }

    /// Replaces the interval of a running clock and restarts its deadline.
    ///
    /// A stopped clock stays stopped.
    pub fn reschedule(&mut self, interval: Duration, now: Instant) {
        if self.is_running() {
            debug!("clock rescheduled to {interval:?}");
            self.start(interval, now);
        }
    }

    /// Cancels ticking; any deadline already passed will not fire.
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Returns true when a tick is due at `now`, and arms the next deadline.
    ///
    /// At most one tick is reported per call, and a late poll does not
    /// produce a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ClockState::Running {
            interval,
            next_tick_at,
        } = self.state
        else {
            return false;
        };

        if now < next_tick_at {
            return false;
        }

        self.state = ClockState::Running {
            interval,
            next_tick_at: now + interval,
        };
        true
    }

    #[must_use]
    pub fn state(&self) -> ClockState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        match self.state {
            ClockState::Running { interval, .. } => Some(interval),
            ClockState::Stopped => None,
        }
    }

    /// Time left before the next tick, or `None` while stopped.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        match self.state {
            ClockState::Running { next_tick_at, .. } => {
                Some(next_tick_at.saturating_duration_since(now))
            }
            ClockState::Stopped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ClockState, SimulationClock};

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn stopped_clock_never_fires() {
        let mut clock = SimulationClock::new();
        let now = Instant::now();

        assert!(!clock.poll(now + Duration::from_secs(10)));
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.time_until_next_tick(now), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut clock = SimulationClock::new();
        let start = Instant::now();
        clock.start(MS_100, start);

        assert!(!clock.poll(start + Duration::from_millis(99)));
        assert!(clock.poll(start + MS_100));
        assert!(!clock.poll(start + MS_100));
        assert!(clock.poll(start + Duration::from_millis(200)));
    }

    #[test]
    fn late_poll_does_not_burst() {
        let mut clock = SimulationClock::new();
        let start = Instant::now();
        clock.start(MS_100, start);

        let late = start + Duration::from_millis(550);
        assert!(clock.poll(late));
        assert!(!clock.poll(late));
        assert_eq!(clock.time_until_next_tick(late), Some(MS_100));
    }

    #[test]
    fn reschedule_restarts_deadline_with_new_interval() {
        let mut clock = SimulationClock::new();
        let start = Instant::now();
        clock.start(MS_100, start);

        let growth_at = start + Duration::from_millis(90);
        clock.reschedule(Duration::from_millis(75), growth_at);

        assert_eq!(clock.interval(), Some(Duration::from_millis(75)));
        assert!(!clock.poll(start + MS_100));
        assert!(clock.poll(growth_at + Duration::from_millis(75)));
    }

    #[test]
    fn stop_cancels_overdue_tick() {
        let mut clock = SimulationClock::new();
        let start = Instant::now();
        clock.start(MS_100, start);

        clock.stop();

        assert!(!clock.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn reschedule_does_not_revive_a_stopped_clock() {
        let mut clock = SimulationClock::new();
        let now = Instant::now();

        clock.reschedule(MS_100, now);

        assert!(!clock.is_running());
    }
}
