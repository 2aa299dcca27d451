//! Debounced analysis scheduling
//!
//! Input changes arrive in bursts (an image is picked, then resized, then a
//! harmony filter is chosen). Each change restarts a single pending timer;
//! only when the inputs have been quiet for the debounce delay does
//! [`AnalysisScheduler::poll`] report that the engine should run. While a
//! run is in flight further triggers are suppressed.
//!
//! The scheduler owns no clock and no thread. Callers pass `Instant`s in,
//! typically from their own event loop tick.

use std::time::{Duration, Instant};

use log::debug;

use crate::config::MatcherConfig;

/// Where the scheduler is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Nothing to do
    Idle,
    /// Inputs changed at `since`; waiting for the delay to elapse
    Pending { since: Instant },
    /// The engine has been asked to run and has not completed yet
    InFlight,
}

/// Event-driven debounce in front of the match engine
#[derive(Debug, Clone)]
pub struct AnalysisScheduler {
    delay: Duration,
    state: Schedule,
    inputs_ready: bool,
    /// Set when inputs change while a run is in flight
    rerun_requested: bool,
}

impl AnalysisScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Schedule::Idle,
            inputs_ready: true,
            rerun_requested: false,
        }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.debounce_delay())
    }

    pub fn state(&self) -> Schedule {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Report whether both images are available; a pending timer is dropped
    /// when they stop being ready
    pub fn set_inputs_ready(&mut self, ready: bool) {
        self.inputs_ready = ready;
        if !ready {
            if let Schedule::Pending { .. } = self.state {
                self.state = Schedule::Idle;
            }
        }
    }

    /// Restart the pending timer
    pub fn inputs_changed(&mut self, now: Instant) {
        match self.state {
            Schedule::InFlight => {
                debug!("inputs changed during analysis, rerun queued");
                self.rerun_requested = true;
            }
            _ if !self.inputs_ready => {}
            _ => self.state = Schedule::Pending { since: now },
        }
    }

    /// Time left before the pending analysis fires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            Schedule::Pending { since } => {
                Some(self.delay.saturating_sub(now.saturating_duration_since(since)))
            }
            _ => None,
        }
    }

    /// Returns true exactly once per quiet period, when the engine should run
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            Schedule::Pending { since }
                if self.inputs_ready && now.saturating_duration_since(since) >= self.delay =>
            {
                self.state = Schedule::InFlight;
                true
            }
            _ => false,
        }
    }

    /// Mark the in-flight run finished
    ///
    /// If inputs changed while it ran, a new pending period starts at `now`.
    pub fn complete(&mut self, now: Instant) {
        if self.state != Schedule::InFlight {
            return;
        }
        self.state = Schedule::Idle;
        if std::mem::take(&mut self.rerun_requested) {
            self.inputs_changed(now);
        }
    }

    /// Forget any pending or queued work
    pub fn reset(&mut self) {
        self.state = Schedule::Idle;
        self.rerun_requested = false;
    }
}

impl Default for AnalysisScheduler {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}
