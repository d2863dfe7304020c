//! Pausable clock driving ring spin.
//!
//! Spin is a pure function of elapsed time, so pausing the clock freezes
//! the rings without touching them.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Time {
    start: Instant,
    elapsed_secs: f32,
    /// Set while paused.
    paused_at: Option<Instant>,
    /// Time spent in finished pauses.
    paused_total: Duration,
}

impl Time {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed_secs: 0.0,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Advance to now and return the running time in seconds.
    ///
    /// While paused the value holds still.
    pub fn update(&mut self) -> f32 {
        if self.paused_at.is_none() {
            let running = self.start.elapsed().saturating_sub(self.paused_total);
            self.elapsed_secs = running.as_secs_f32();
        }
        self.elapsed_secs
    }

    /// Running time at the last [`Time::update`], pauses excluded.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn toggle_pause(&mut self) {
        match self.paused_at.take() {
            Some(at) => self.paused_total += at.elapsed(),
            None => self.paused_at = Some(Instant::now()),
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_running_at_zero() {
        let time = Time::new();
        assert!(!time.is_paused());
        assert_eq!(time.elapsed(), 0.0);
    }

    #[test]
    fn test_update_advances() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let elapsed = time.update();
        assert!(elapsed >= 0.01);
        assert_eq!(time.elapsed(), elapsed);
    }

    #[test]
    fn test_paused_clock_holds_still() {
        let mut time = Time::new();
        time.update();
        time.toggle_pause();
        assert!(time.is_paused());

        let before = time.elapsed();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(time.update(), before);
    }

    #[test]
    fn test_resume_excludes_paused_span() {
        let mut time = Time::new();
        time.toggle_pause();
        thread::sleep(Duration::from_millis(50));
        time.toggle_pause();
        assert!(!time.is_paused());
        let elapsed = time.update();
        assert!(elapsed < 0.045, "elapsed {elapsed} includes the pause");
    }
}
