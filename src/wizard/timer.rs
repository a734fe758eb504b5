//! Cancellable debounce timer polled from the event loop

use std::time::Duration;
use tokio::time::Instant;

/// A single-shot deadline that is restarted on every `schedule` call.
///
/// The timer never runs anything on its own; the owner checks
/// [`DebounceTimer::fire_if_due`] from its loop. Cancelling clears the
/// deadline, so nothing fires afterwards.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start the quiet period again from now
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per quiet period that has fully elapsed
    pub fn fire_if_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut timer = DebounceTimer::new(Duration::from_millis(1000));
        timer.schedule();
        advance(Duration::from_millis(999)).await;
        assert!(!timer.fire_if_due());
        advance(Duration::from_millis(1)).await;
        assert!(timer.fire_if_due());
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_only_once() {
        let mut timer = DebounceTimer::new(Duration::from_millis(10));
        timer.schedule();
        advance(Duration::from_millis(50)).await;
        assert!(timer.fire_if_due());
        assert!(!timer.fire_if_due());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_pushes_deadline_back() {
        let mut timer = DebounceTimer::new(Duration::from_millis(1000));
        timer.schedule();
        advance(Duration::from_millis(600)).await;
        timer.schedule();
        advance(Duration::from_millis(600)).await;
        assert!(!timer.fire_if_due());
        advance(Duration::from_millis(400)).await;
        assert!(timer.fire_if_due());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        timer.schedule();
        timer.cancel();
        advance(Duration::from_secs(5)).await;
        assert!(!timer.fire_if_due());
    }

    #[test]
    fn test_new_timer_is_idle() {
        let timer = DebounceTimer::new(Duration::from_millis(250));
        assert!(!timer.is_pending());
    }
}
