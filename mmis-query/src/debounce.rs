//! Keystroke debouncing for search inputs.
//!
//! The caller supplies the clock. `Debouncer` never sleeps and never spawns;
//! an input loop feeds it values with `input` and asks it with `poll` whether
//! a settled query should be searched now.

use std::time::{Duration, Instant};

use crate::config::SearchConfig;

/// Holds back a typed value until it has been stable for the delay.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use mmis_query::Debouncer;
///
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
/// let t0 = Instant::now();
///
/// debouncer.input("ni", t0);
/// debouncer.input("nile", t0 + Duration::from_millis(100));
/// assert_eq!(debouncer.poll(t0 + Duration::from_millis(350)), None);
/// assert_eq!(debouncer.poll(t0 + Duration::from_millis(400)), Some("nile".to_string()));
/// assert_eq!(debouncer.poll(t0 + Duration::from_millis(900)), None);
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    last_emitted: Option<String>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_emitted: None,
        }
    }

    /// Create a debouncer using the configured delay.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.debounce())
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new input value at `now`, restarting the quiet period.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now));
    }

    /// The value waiting to settle, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|(value, _)| value.as_str())
    }

    /// Return the settled value once the quiet period has elapsed.
    ///
    /// A value equal to the last one returned is swallowed, so typing and
    /// deleting a character does not search twice.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = match &self.pending {
            Some((_, at)) => now.saturating_duration_since(*at) >= self.delay,
            None => false,
        };
        if !ready {
            return None;
        }
        let (value, _) = self.pending.take()?;
        self.emit(value)
    }

    /// Return the pending value immediately, as on pressing Enter.
    pub fn flush(&mut self) -> Option<String> {
        let (value, _) = self.pending.take()?;
        self.emit(value)
    }

    fn emit(&mut self, value: String) -> Option<String> {
        if self.last_emitted.as_deref() == Some(value.as_str()) {
            tracing::trace!(query = %value, "Debounced query unchanged");
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
