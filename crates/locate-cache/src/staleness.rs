//! Last-use clock and index rebuild detection.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

pub fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Decides when the caches must be dropped because the index was rebuilt.
///
/// The database is only probed after a quiet period longer than the staleness
/// interval, so bursts of keystrokes never touch the filesystem for it.
#[derive(Debug, Clone)]
pub struct StalenessClock {
    interval: u64,
    last_use: Option<u64>,
    index_mtime: Option<SystemTime>,
}

impl StalenessClock {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last_use: None,
            index_mtime: None,
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn index_mtime(&self) -> Option<SystemTime> {
        self.index_mtime
    }

    /// Records a use at `now`. Returns true when the previous use is more
    /// than one interval old, or when this is the first use.
    pub fn touch(&mut self, now: u64) -> bool {
        match self.last_use.replace(now) {
            Some(previous) => now.saturating_sub(previous) > self.interval,
            None => true,
        }
    }

    /// Remembers `mtime`. Returns true when it differs from the last value seen.
    pub fn observe_index_mtime(&mut self, mtime: SystemTime) -> bool {
        if self.index_mtime == Some(mtime) {
            return false;
        }
        self.index_mtime = Some(mtime);
        true
    }

    /// Runs one query's staleness check. Returns true when every cache must
    /// be cleared. A failed probe skips the rebuild check for this cycle.
    pub fn check(&mut self, now: u64, probe: impl FnOnce() -> Result<SystemTime>) -> bool {
        if !self.touch(now) {
            return false;
        }
        match probe() {
            Ok(mtime) => self.observe_index_mtime(mtime),
            Err(error) => {
                log::debug!("skipping index rebuild check: {error}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::error::LocateError;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn first_use_and_quiet_periods_trigger_probe() {
        let mut clock = StalenessClock::new(60);
        assert!(clock.touch(1000));
        assert!(!clock.touch(1030));
        assert!(!clock.touch(1090));
        assert!(clock.touch(1151));
    }

    #[test]
    fn rapid_queries_skip_the_probe() {
        let mut clock = StalenessClock::new(60);
        assert!(clock.check(100, || Ok(at(5))));
        let mut probed = false;
        assert!(!clock.check(110, || {
            probed = true;
            Ok(at(6))
        }));
        assert!(!probed);
    }

    #[test]
    fn changed_mtime_requests_clear() {
        let mut clock = StalenessClock::new(60);
        assert!(clock.check(0, || Ok(at(5))));
        assert!(!clock.check(100, || Ok(at(5))));
        assert!(clock.check(200, || Ok(at(7))));
        assert_eq!(clock.index_mtime(), Some(at(7)));
    }

    #[test]
    fn failed_probe_is_soft() {
        let mut clock = StalenessClock::new(60);
        assert!(clock.check(0, || Ok(at(5))));
        assert!(!clock.check(100, || Err(LocateError::DatabaseNotFound("x".to_string()))));
        assert_eq!(clock.index_mtime(), Some(at(5)));
        assert!(!clock.check(200, || Ok(at(5))));
    }

    #[test]
    fn clock_going_backwards_is_not_stale() {
        let mut clock = StalenessClock::new(60);
        clock.touch(500);
        assert!(!clock.touch(10));
    }
}
