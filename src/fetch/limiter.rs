use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Enforces a minimum gap between outbound API attempts.
///
/// One limiter is built at startup and shared by every caller, so concurrent
/// sessions draw from the same budget. Attempts are counted when they start,
/// not when they succeed: a failing call still pushes the next one back.
#[derive(Debug)]
pub struct RateLimiter {
    cooldown: Duration,
    last_attempt: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_attempt: Mutex::new(None),
        }
    }

    pub fn shared(cooldown: Duration) -> Arc<Self> {
        Arc::new(Self::new(cooldown))
    }

    /// Claim the next slot now, or report how long until one opens.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        self.try_acquire_at(Instant::now())
    }

    /// Check and record under one lock so two callers can never both pass.
    pub fn try_acquire_at(&self, now: Instant) -> Result<(), Duration> {
        let mut last = self.lock();
        if let Some(remaining) = remaining_since(*last, now, self.cooldown) {
            return Err(remaining);
        }
        *last = Some(now);
        Ok(())
    }

    /// Time left before a call may proceed; does not claim the slot.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        remaining_since(*self.lock(), now, self.cooldown)
    }

    pub fn last_attempt(&self) -> Option<Instant> {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        // A poisoned lock still holds a valid timestamp.
        self.last_attempt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn remaining_since(last: Option<Instant>, now: Instant, cooldown: Duration) -> Option<Duration> {
    let last = last?;
    let elapsed = now.saturating_duration_since(last);
    if elapsed < cooldown {
        Some(cooldown - elapsed)
    } else {
        None
    }
}
