//! Periodic auto-save checkpoints.
//!
//! The timer is owned by the editor session and driven by the host's event
//! loop through [`AutoSave::tick`]; time is always passed in, never read
//! from a global.

use crate::clock::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Save-checkpoint bookkeeping plus a cancellable periodic timer.
#[derive(Debug, Clone)]
pub struct AutoSave {
    interval: Duration,
    /// Next time the timer fires; `None` while stopped.
    next_due: Option<Instant>,
    /// Milliseconds since the Unix epoch of the last checkpoint.
    last_saved: u64,
    dirty: bool,
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS))
    }
}

impl AutoSave {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            last_saved: 0,
            dirty: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start (or restart) the timer; the first tick fires one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
        log::info!("Auto-save started, every {}s", self.interval.as_secs());
    }

    /// Cancel the timer. Checkpoint data is kept.
    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            log::info!("Auto-save stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Advance the timer to `now`. Fires at most once per call, and only
    /// while running. Returns true when a checkpoint was taken.
    pub fn tick(&mut self, now: Instant, now_ms: u64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.interval;
        while next <= now && !self.interval.is_zero() {
            next += self.interval;
        }
        self.next_due = Some(next);
        self.checkpoint(now_ms);
        log::info!("Project saved automatically at {now_ms}");
        true
    }

    /// Record a save at `now_ms` (milliseconds since the Unix epoch).
    pub fn checkpoint(&mut self, now_ms: u64) {
        self.last_saved = now_ms;
        self.dirty = false;
    }

    /// Milliseconds since the Unix epoch of the last checkpoint.
    pub fn last_saved(&self) -> u64 {
        self.last_saved
    }

    /// Mark the document as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Time elapsed since the last checkpoint.
    pub fn time_since_save(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.last_saved))
    }
}

/// Human-readable age such as "12 seconds ago" or "1 hour ago".
pub fn format_time_since(elapsed: Duration) -> String {
    fn unit(n: u64, name: &str) -> String {
        if n == 1 {
            format!("{n} {name} ago")
        } else {
            format!("{n} {name}s ago")
        }
    }

    let seconds = elapsed.as_secs();
    if seconds < 60 {
        return unit(seconds, "second");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return unit(minutes, "minute");
    }
    unit(minutes / 60, "hour")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_running_by_default() {
        let mut autosave = AutoSave::default();
        assert!(!autosave.is_running());
        assert!(!autosave.tick(Instant::now(), 1));
        assert_eq!(autosave.interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_tick_fires_once_per_interval() {
        let start = Instant::now();
        let mut autosave = AutoSave::new(Duration::from_secs(30));
        autosave.start(start);
        autosave.mark_dirty();

        assert!(!autosave.tick(start + Duration::from_secs(29), 29_000));
        assert!(autosave.is_dirty());
        assert!(autosave.tick(start + Duration::from_secs(30), 30_000));
        assert!(!autosave.is_dirty());
        assert_eq!(autosave.last_saved(), 30_000);
        assert!(!autosave.tick(start + Duration::from_secs(31), 31_000));

        // A long stall fires only once, then waits a full interval again.
        assert!(autosave.tick(start + Duration::from_secs(200), 200_000));
        assert!(!autosave.tick(start + Duration::from_secs(205), 205_000));
        assert!(autosave.tick(start + Duration::from_secs(210), 210_000));
    }

    #[test]
    fn test_stop_cancels() {
        let start = Instant::now();
        let mut autosave = AutoSave::default();
        autosave.start(start);
        autosave.stop();
        assert!(!autosave.is_running());
        assert!(!autosave.tick(start + Duration::from_secs(120), 120_000));
    }

    #[test]
    fn test_time_since_save() {
        let mut autosave = AutoSave::default();
        autosave.checkpoint(10_000);
        assert_eq!(autosave.time_since_save(15_500), Duration::from_millis(5_500));
        assert_eq!(autosave.time_since_save(5_000), Duration::ZERO);
    }

    #[test]
    fn test_format_time_since() {
        assert_eq!(format_time_since(Duration::from_secs(1)), "1 second ago");
        assert_eq!(format_time_since(Duration::from_secs(42)), "42 seconds ago");
        assert_eq!(format_time_since(Duration::from_secs(60)), "1 minute ago");
        assert_eq!(format_time_since(Duration::from_secs(7_300)), "2 hours ago");
    }
}
