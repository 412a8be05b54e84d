use std::time::{Duration, Instant};

/// Fixed-period tick scheduler driven by an external clock.
///
/// The ticker never sleeps or spawns; the owner polls it with the current
/// instant and runs one tick whenever `poll` returns true.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    /// Arms the ticker; the first tick fires one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_deadline = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Returns true at most once per elapsed deadline and re-arms from `now`.
    ///
    /// Missed periods are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_deadline {
            Some(deadline) if now >= deadline => {
                self.next_deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, or `None` while stopped.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Ticker;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn stopped_ticker_never_fires() {
        let mut ticker = Ticker::new(PERIOD);
        let now = Instant::now();

        assert!(!ticker.is_running());
        assert!(!ticker.poll(now + PERIOD * 10));
        assert_eq!(ticker.time_until_next(now), None);
    }

    #[test]
    fn fires_once_per_elapsed_period() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.start(start);

        assert!(!ticker.poll(start + PERIOD / 2));
        assert!(ticker.poll(start + PERIOD));
        assert!(!ticker.poll(start + PERIOD));
        assert!(ticker.poll(start + PERIOD * 2));
    }

    #[test]
    fn late_poll_does_not_replay_missed_ticks() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.start(start);

        let late = start + PERIOD * 5;
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.time_until_next(late), Some(PERIOD));
    }

    #[test]
    fn stop_disarms_pending_tick() {
        let mut ticker = Ticker::new(PERIOD);
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();

        assert!(!ticker.is_running());
        assert!(!ticker.poll(start + PERIOD));
    }
}
