//! The generator's configuration and its current direction of travel.

use crate::bounce::{self, Vector};
use crate::platform::{InputSink, TrayIcon};
use crate::scheduler::Scheduler;

use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL_MS: u32 = 1000;
pub const DEFAULT_STEP: u32 = 1;
pub const DEFAULT_ENABLED: bool = false;

/// Settings as they appear in the key/value store. Every key is optional and
/// independent of the others.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct StoredSettings {
    pub interval: Option<u32>,
    pub step: Option<u32>,
    pub enabled: Option<bool>,
}

impl StoredSettings {
    /// Keys present in `other` replace ours.
    pub fn merge(&mut self, other: &StoredSettings) {
        if other.interval.is_some() {
            self.interval = other.interval;
        }
        if other.step.is_some() {
            self.step = other.step;
        }
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Settings {
    interval_ms: u32,
    step: u32,
    vector: Vector,
    enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            step: DEFAULT_STEP,
            vector: Vector::uniform(DEFAULT_STEP, false),
            enabled: DEFAULT_ENABLED,
        }
    }
}

impl Settings {
    /// Takes the interval and step from `stored`, ignoring zero values.
    ///
    /// The result is always disabled: the enabled flag can only be turned on
    /// through [`Settings::toggle_enabled`] so that the timer gets armed.
    pub fn restore(stored: &StoredSettings) -> Self {
        let mut settings = Self::default();

        match stored.interval {
            Some(0) => log::warn!("ignoring stored interval of 0 ms"),
            Some(ms) => settings.interval_ms = ms,
            None => (),
        }
        match stored.step {
            Some(0) => log::warn!("ignoring stored step of 0 px"),
            Some(step) => {
                settings.step = step;
                settings.vector = Vector::uniform(step, false);
            }
            None => (),
        }

        settings
    }

    pub fn to_stored(&self) -> StoredSettings {
        StoredSettings {
            interval: Some(self.interval_ms),
            step: Some(self.step),
            enabled: Some(self.enabled),
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms))
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn vector(&self) -> Vector {
        self.vector
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets a new step and rebuilds the vector with the sign of `dx` carried
    /// over to both axes, then re-samples the bounce at the live pointer.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn set_step<S: InputSink>(&mut self, step: u32, sink: &S) {
        assert!(step > 0, "step must be positive");
        log::info!("step set to {step} px");

        self.step = step;
        self.vector = Vector::uniform(step, self.vector.dx < 0);
        self.resample(sink);
    }

    /// Sets a new tick period, restarting the timer if it is running.
    ///
    /// # Panics
    ///
    /// Panics if `interval_ms` is zero.
    pub fn set_interval(&mut self, interval_ms: u32, scheduler: &mut Scheduler, now: Instant) {
        assert!(interval_ms > 0, "interval must be positive");
        log::info!("interval set to {interval_ms} ms");

        self.interval_ms = interval_ms;
        if scheduler.is_armed() {
            scheduler.restart(self.interval(), now);
        }
    }

    /// Flips the enabled flag, arms or disarms the timer to match, and updates
    /// the tray icon.
    pub fn toggle_enabled<S: InputSink, T: TrayIcon>(
        &mut self,
        scheduler: &mut Scheduler,
        sink: &S,
        tray: &mut T,
        now: Instant,
    ) {
        self.enabled = !self.enabled;

        if self.enabled {
            self.set_step(self.step, sink);
            scheduler.arm(self.interval(), now);
            log::info!(
                "enabled: {} px every {} ms",
                self.step,
                self.interval_ms
            );
        } else {
            scheduler.disarm();
            log::info!("disabled");
        }

        tray.set_icon_state(self.enabled);
    }

    /// Updates the vector from the pointer's current position and returns it.
    pub fn resample<S: InputSink>(&mut self, sink: &S) -> Vector {
        self.vector = bounce::next_vector(
            sink.pointer_position(),
            &sink.screen_bounds(),
            self.vector,
            self.step,
        );
        self.vector
    }
}
