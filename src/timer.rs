//! Reading stopwatch.
//!
//! Wall-clock based: elapsed time is derived from the instant the watch was
//! last started, so it stays correct no matter how rarely it is polled.

use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    /// Whole seconds accumulated before the current run.
    base_secs: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start when stopped, pause when running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.toggle_at(Instant::now())
    }

    pub fn toggle_at(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.pause_at(now);
        } else {
            self.started_at = Some(now);
        }
        self.is_running()
    }

    pub fn pause_at(&mut self, now: Instant) {
        self.base_secs = self.elapsed_secs_at(now);
        self.started_at = None;
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.base_secs = 0;
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(start) => self.base_secs + now.saturating_duration_since(start).as_secs(),
            None => self.base_secs,
        }
    }
}

/// `HH:MM:SS`, always zero-padded.
pub fn format_clock(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_start_pause_resume() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        assert!(watch.toggle_at(t0));
        assert_eq!(watch.elapsed_secs_at(t0 + Duration::from_millis(2500)), 2);

        assert!(!watch.toggle_at(t0 + Duration::from_secs(3)));
        assert_eq!(watch.elapsed_secs_at(t0 + Duration::from_secs(100)), 3);

        let t1 = t0 + Duration::from_secs(100);
        watch.toggle_at(t1);
        assert_eq!(watch.elapsed_secs_at(t1 + Duration::from_secs(4)), 7);
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::new();
        watch.toggle_at(t0);
        watch.pause_at(t0 + Duration::from_secs(10));
        watch.reset();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed_secs_at(t0 + Duration::from_secs(20)), 0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(59), "00:00:59");
        assert_eq!(format_clock(3725), "01:02:05");
    }
}
