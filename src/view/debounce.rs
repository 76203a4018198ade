use std::time::{Duration, Instant};

/// Quiet-period debounce for search input.
///
/// Each keystroke pushes the deadline out; the term is released only once no
/// input has arrived for the whole quiet period. Time is passed in so the
/// event loop owns the clock.
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    pub fn input(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now + self.quiet));
    }

    /// When the pending term becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Take the lowercased term once its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => self
                .pending
                .take()
                .map(|(text, _)| text.to_lowercase()),
            _ => None,
        }
    }

    /// Release the pending term immediately (e.g. on Enter)
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text.to_lowercase())
    }
}
