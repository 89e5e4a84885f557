//! Debounced commit of the search input.
//!
//! Zellij timers cannot be cancelled once armed, so the debouncer does not rely
//! on cancellation. It keeps the time of the last edit and, when a timer fires,
//! decides from the clock whether the input has been stable long enough. At
//! most one timer is in flight at a time: an early fire re-arms for the
//! remaining time instead of every keystroke arming its own timer.
//!
//! The clock is injected (`now: Instant`) so every transition is deterministic
//! in tests.

use std::time::{Duration, Instant};

/// Default stability window before a typed term is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Outcome of a timer firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Nothing pending, or the settled value equals the committed term.
    Idle,
    /// Input changed since the timer was armed; re-arm for the remaining time.
    Wait(Duration),
    /// The input has been stable for the full delay and differs from the
    /// previously committed term.
    Commit(String),
}

#[derive(Debug, Clone)]
struct Pending {
    value: String,
    last_input: Instant,
}

/// Coalesces rapid edits into a single committed search term.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
    timer_armed: bool,
    committed: String,
}

impl Debouncer {
    /// Creates a debouncer with the given delay. The committed term starts
    /// empty, which selects the popular listing.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            timer_armed: false,
            committed: String::new(),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// The last committed term.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Returns `true` while an edit is waiting for the input to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new input value.
    ///
    /// Returns the duration of a timer the caller must arm, or `None` when a
    /// timer is already in flight and will pick the new value up.
    pub fn input(&mut self, value: &str, now: Instant) -> Option<Duration> {
        self.pending = Some(Pending {
            value: value.to_string(),
            last_input: now,
        });

        if self.timer_armed {
            None
        } else {
            self.timer_armed = true;
            Some(self.delay)
        }
    }

    /// Handles a timer firing at `now`.
    ///
    /// Only the final value is ever committed; intermediate values are
    /// overwritten by [`Debouncer::input`] and never surface.
    pub fn on_timer(&mut self, now: Instant) -> Tick {
        self.timer_armed = false;

        let Some(pending) = self.pending.as_ref() else {
            return Tick::Idle;
        };

        let elapsed = now.saturating_duration_since(pending.last_input);
        if elapsed < self.delay {
            self.timer_armed = true;
            return Tick::Wait(self.delay - elapsed);
        }

        let Some(settled) = self.pending.take() else {
            return Tick::Idle;
        };

        if settled.value == self.committed {
            Tick::Idle
        } else {
            self.committed.clone_from(&settled.value);
            Tick::Commit(settled.value)
        }
    }

    /// Drops any pending edit. A timer already in flight still fires, but
    /// resolves to [`Tick::Idle`].
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
