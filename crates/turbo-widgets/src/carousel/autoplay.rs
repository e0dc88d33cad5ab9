//! Autoplay timer with hover/focus/visibility pauses.

use web_time::{Duration, Instant};

/// Reasons autoplay may be held. Any one of them pauses; all must clear to resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    Hover,
    Focus,
    Offscreen,
    Drag,
}

impl PauseReason {
    fn bit(self) -> u8 {
        match self {
            PauseReason::Hover => 1,
            PauseReason::Focus => 1 << 1,
            PauseReason::Offscreen => 1 << 2,
            PauseReason::Drag => 1 << 3,
        }
    }
}

/// Fixed-interval ticker polled by the host loop.
#[derive(Debug, Clone)]
pub struct AutoplayTimer {
    interval: Duration,
    running: bool,
    paused: u8,
    next_due: Option<Instant>,
}

impl AutoplayTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            paused: 0,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused != 0
    }

    pub fn is_paused_by(&self, reason: PauseReason) -> bool {
        self.paused & reason.bit() != 0
    }

    /// When the next tick is due, if one is scheduled.
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.reschedule(now);
    }

    /// Stop and clear the schedule. Pause reasons are kept.
    pub fn stop(&mut self) {
        self.running = false;
        self.next_due = None;
    }

    /// Start a fresh interval, e.g. after the user navigated manually.
    pub fn restart(&mut self, now: Instant) {
        self.next_due = None;
        self.reschedule(now);
    }

    pub fn set_paused(&mut self, reason: PauseReason, paused: bool, now: Instant) {
        let before = self.paused;
        if paused {
            self.paused |= reason.bit();
        } else {
            self.paused &= !reason.bit();
        }
        if before != self.paused {
            tracing::trace!(?reason, paused, "autoplay pause state changed");
            self.reschedule(now);
        }
    }

    /// Returns true when a tick is due. At most one tick fires per poll even
    /// if the host fell behind by several intervals.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    fn reschedule(&mut self, now: Instant) {
        if !self.running || self.is_paused() {
            self.next_due = None;
        } else if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_ticks_on_interval() {
        let t0 = Instant::now();
        let mut timer = AutoplayTimer::new(ms(5000));
        timer.start(t0);

        assert!(!timer.poll(t0 + ms(4999)));
        assert!(timer.poll(t0 + ms(5000)));
        assert!(!timer.poll(t0 + ms(5001)));
        assert!(timer.poll(t0 + ms(10_000)));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let t0 = Instant::now();
        let mut timer = AutoplayTimer::new(ms(3000));
        timer.start(t0);

        assert!(timer.poll(t0 + ms(20_000)));
        assert!(!timer.poll(t0 + ms(20_001)));
        assert_eq!(timer.next_due(), Some(t0 + ms(23_000)));
    }

    #[test]
    fn test_hover_pauses_and_leave_resumes_fresh_interval() {
        let t0 = Instant::now();
        let mut timer = AutoplayTimer::new(ms(4000));
        timer.start(t0);

        timer.set_paused(PauseReason::Hover, true, t0 + ms(3000));
        assert!(timer.is_paused());
        assert!(!timer.poll(t0 + ms(9000)));

        timer.set_paused(PauseReason::Hover, false, t0 + ms(9000));
        assert!(!timer.poll(t0 + ms(12_999)));
        assert!(timer.poll(t0 + ms(13_000)));
    }

    #[test]
    fn test_all_reasons_must_clear() {
        let t0 = Instant::now();
        let mut timer = AutoplayTimer::new(ms(1000));
        timer.start(t0);

        timer.set_paused(PauseReason::Hover, true, t0);
        timer.set_paused(PauseReason::Focus, true, t0);
        timer.set_paused(PauseReason::Hover, false, t0);
        assert!(timer.is_paused_by(PauseReason::Focus));
        assert_eq!(timer.next_due(), None);

        timer.set_paused(PauseReason::Focus, false, t0 + ms(500));
        assert_eq!(timer.next_due(), Some(t0 + ms(1500)));
    }

    #[test]
    fn test_restart_after_manual_navigation() {
        let t0 = Instant::now();
        let mut timer = AutoplayTimer::new(ms(4000));
        timer.start(t0);
        timer.restart(t0 + ms(3500));
        assert!(!timer.poll(t0 + ms(4000)));
        assert!(timer.poll(t0 + ms(7500)));
    }

    #[test]
    fn test_stop_clears_schedule() {
        let t0 = Instant::now();
        let mut timer = AutoplayTimer::new(ms(1000));
        timer.start(t0);
        timer.stop();
        assert!(!timer.poll(t0 + ms(5000)));

        // Pausing or restarting a stopped timer does not revive it.
        timer.restart(t0 + ms(5000));
        assert_eq!(timer.next_due(), None);
    }
}
