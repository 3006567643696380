use std::time::{Duration, Instant};

/// Single debounced deadline for resuming auto-scroll. Scheduling again
/// replaces the pending deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeTimer {
    due: Option<Instant>,
}

impl ResumeTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    /// Consumes the deadline once `now` has reached it.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
