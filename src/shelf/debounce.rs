//! # Debouncing
//!
//! A [`Debouncer`] holds at most one pending value. Every [`Debouncer::push`] cancels the
//! previous pending value and restarts the countdown; only a countdown that runs out
//! uncancelled hands its value back from [`Debouncer::poll`].
//!
//! The debouncer never reads a clock. Callers pass `now` with every call, which keeps the
//! quiescent window deterministic:
//!
//! ```
//! use shelf::debounce::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let ms = Duration::from_millis;
//! let mut d = Debouncer::new(ms(500));
//!
//! d.push("a", t0);
//! d.push("ab", t0 + ms(100));
//! d.push("abc", t0 + ms(200));
//!
//! assert_eq!(d.poll(t0 + ms(650)), None);
//! assert_eq!(d.poll(t0 + ms(700)), Some("abc"));
//! assert_eq!(d.poll(t0 + ms(900)), None);
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Schedules `value`, superseding whatever was pending.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Commits the pending value immediately, as if its countdown had run out.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value fires, `None` when nothing is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(now))
    }
}
