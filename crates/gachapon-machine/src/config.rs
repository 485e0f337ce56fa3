//! Machine configuration and spin timing profiles.

use std::time::Duration;

use gachapon_core::rng::DrawRng;

/// Options a fresh machine starts with when no persisted state exists.
pub const DEFAULT_OPTIONS: [&str; 5] = [
    "Dumplings",
    "Fried Dumplings",
    "Noodles",
    "Pasta",
    "Hot Dogs",
];

/// Timing profile for one spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTiming {
    /// Minimum spin duration.
    pub base_duration: Duration,
    /// Random extra duration added on top of `base_duration`.
    pub duration_jitter: Duration,
    /// Interval between interim candidate updates.
    pub tick_interval: Duration,
    /// Window at the end of the spin with no interim updates.
    pub quiet_tail: Duration,
    /// Pause after the outcome is committed before the machine accepts
    /// the next spin.
    pub settle_delay: Duration,
}

impl SpinTiming {
    /// Normal gameplay timing.
    #[must_use]
    pub fn normal() -> Self {
        Self {
            base_duration: Duration::from_millis(2000),
            duration_jitter: Duration::from_millis(1000),
            tick_interval: Duration::from_millis(100),
            quiet_tail: Duration::from_millis(500),
            settle_delay: Duration::from_millis(1000),
        }
    }

    /// Studio timing: the same shape at a fraction of the wall-clock
    /// cost, for tests and demos.
    #[must_use]
    pub fn studio() -> Self {
        Self {
            base_duration: Duration::from_millis(20),
            duration_jitter: Duration::from_millis(10),
            tick_interval: Duration::from_millis(1),
            quiet_tail: Duration::from_millis(5),
            settle_delay: Duration::from_millis(10),
        }
    }

    /// Rolls the total duration of one spin: `base_duration` plus a
    /// uniform share of `duration_jitter`.
    pub fn roll_duration(&self, rng: &mut dyn DrawRng) -> Duration {
        self.base_duration + self.duration_jitter.mul_f64(rng.unit_f64())
    }
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self::normal()
    }
}

/// Top-level machine configuration.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Spin timing profile.
    pub timing: SpinTiming,
    /// Options used when no persisted state exists.
    pub default_options: Vec<String>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            timing: SpinTiming::default(),
            default_options: DEFAULT_OPTIONS.into_iter().map(String::from).collect(),
        }
    }
}
