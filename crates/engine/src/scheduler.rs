//! Tick scheduler - decides when the next gravity tick is due
//!
//! The game reports its tick interval; the scheduler compares it with the
//! frame clock supplied by the caller. It never sleeps or spawns timers, so
//! a paused game simply stops asking.

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    last_tick_ms: Option<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { last_tick_ms: None }
    }

    /// Whether a tick is due at `now_ms` for an interval of `speed_ms`.
    ///
    /// The first call after construction or [`Scheduler::reset`] is always
    /// due. A due call records `now_ms` as the new baseline.
    pub fn due(&mut self, now_ms: u64, speed_ms: f64) -> bool {
        let due = match self.last_tick_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) as f64 >= speed_ms,
        };
        if due {
            self.last_tick_ms = Some(now_ms);
        }
        due
    }

    /// Forget the baseline so time spent paused never counts
    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_due() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.due(5_000, 1000.0));
        assert_eq!(scheduler.last_tick_ms(), Some(5_000));
    }

    #[test]
    fn waits_for_full_interval() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.due(0, 500.0));
        assert!(!scheduler.due(499, 500.0));
        assert!(scheduler.due(500, 500.0));
        assert!(!scheduler.due(900, 500.0));
        assert!(scheduler.due(1_000, 500.0));
    }

    #[test]
    fn reset_makes_next_frame_due() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.due(0, 1000.0));
        scheduler.reset();
        assert!(scheduler.due(10, 1000.0));
        assert!(!scheduler.due(20, 1000.0));
    }

    #[test]
    fn clock_going_backwards_is_not_due() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.due(1_000, 100.0));
        assert!(!scheduler.due(10, 100.0));
    }
}
