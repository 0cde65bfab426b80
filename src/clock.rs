use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// Time source for session timing. Tests use a manual clock they advance
/// explicitly instead of sleeping.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    #[default]
    System,
    Manual(Arc<Mutex<SystemTime>>),
}

impl Clock {
    /// A manual clock starting at `at`. Clones share the same timestamp.
    pub fn manual(at: SystemTime) -> Self {
        Self::Manual(Arc::new(Mutex::new(at)))
    }

    pub fn now(&self) -> SystemTime {
        match self {
            Clock::System => SystemTime::now(),
            Clock::Manual(t) => *t.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    /// Move a manual clock forward. Has no effect on `Clock::System`.
    pub fn advance(&self, delta: Duration) {
        if let Clock::Manual(t) = self {
            let mut guard = t.lock().unwrap_or_else(|e| e.into_inner());
            *guard += delta;
        }
    }

    /// Time elapsed since `since`, zero if the clock moved backwards.
    pub fn since(&self, since: SystemTime) -> Duration {
        self.now().duration_since(since).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let clock = Clock::manual(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(3));
        assert_eq!(clock.since(start), Duration::from_secs(3));
    }

    #[test]
    fn clones_share_manual_time() {
        let start = SystemTime::UNIX_EPOCH;
        let clock = Clock::manual(start);
        let other = clock.clone();
        other.advance(Duration::from_millis(250));
        assert_eq!(clock.since(start), Duration::from_millis(250));
    }

    #[test]
    fn since_saturates_for_future_timestamps() {
        let clock = Clock::manual(SystemTime::UNIX_EPOCH);
        let later = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        assert_eq!(clock.since(later), Duration::ZERO);
    }

    #[test]
    fn system_clock_ignores_advance() {
        let clock = Clock::System;
        let before = clock.now();
        clock.advance(Duration::from_secs(3600));
        assert!(clock.since(before) < Duration::from_secs(3600));
    }
}
