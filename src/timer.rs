//! Elapsed-time tracking for a game. The session pauses and resumes its
//! timer on transitions; nothing else drives it.

use std::time::{Duration, Instant};

pub trait Timer {
    /// Start or resume counting. No-op if already running.
    fn start(&mut self);
    /// Stop counting, keeping the elapsed total.
    fn pause(&mut self);
    /// Zero the elapsed total and stop.
    fn reset(&mut self);
    fn elapsed_seconds(&self) -> u64;
    /// Overwrite the elapsed total, keeping the running state.
    fn set_elapsed(&mut self, seconds: u64);
    fn is_running(&self) -> bool;
}

/// Wall-clock timer.
#[derive(Debug, Default)]
pub struct ClockTimer {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl ClockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + since.elapsed(),
            None => self.accumulated,
        }
    }
}

impl Timer for ClockTimer {
    fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = None;
    }

    fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    fn set_elapsed(&mut self, seconds: u64) {
        self.accumulated = Duration::from_secs(seconds);
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }

    fn is_running(&self) -> bool {
        self.running_since.is_some()
    }
}

/// Deterministic timer driven by explicit one-second ticks.
#[derive(Debug, Default, Clone)]
pub struct ManualTimer {
    seconds: u64,
    running: bool,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one second if running.
    pub fn tick(&mut self) {
        if self.running {
            self.seconds += 1;
        }
    }
}

impl Timer for ManualTimer {
    fn start(&mut self) {
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        self.seconds = 0;
        self.running = false;
    }

    fn elapsed_seconds(&self) -> u64 {
        self.seconds
    }

    fn set_elapsed(&mut self, seconds: u64) {
        self.seconds = seconds;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Render elapsed seconds as "M minutes S seconds".
pub fn format_elapsed(seconds: u64) -> String {
    format!("{} minutes {} seconds", seconds / 60, seconds % 60)
}
