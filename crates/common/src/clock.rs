//! Tick timing utilities for replay and simulation.
//!
//! Engine time is milliseconds of `f64` relative to a fixed epoch (the
//! moment a stage or replay started). This module provides:
//! - Capturing the epoch and reading elapsed time
//! - Converting between milliseconds and seconds
//! - Fixed-rate tick gating for replay loops

use std::time::Instant;

/// A monotonic clock anchored to a fixed epoch, with the wall-clock time at
/// that epoch retained for trace headers.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl TickClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since the epoch.
    pub fn elapsed_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Seconds elapsed since the epoch.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Convert milliseconds to seconds.
    pub fn ms_to_secs(ms: f64) -> f64 {
        ms / 1000.0
    }

    /// Convert seconds to milliseconds.
    pub fn secs_to_ms(secs: f64) -> f64 {
        secs * 1000.0
    }
}

/// Fixed-rate tick gate for replay loops.
///
/// Pointer samples can arrive far faster than the animation rate; the gate
/// decides which instants count as ticks so integration runs at most once
/// per frame interval.
#[derive(Debug)]
pub struct RateController {
    target_interval_ms: f64,
    last_tick_ms: Option<f64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ms: 1000.0 / target_hz.max(1) as f64,
            last_tick_ms: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ms: f64) -> bool {
        match self.last_tick_ms {
            None => {
                self.last_tick_ms = Some(current_ms);
                true
            }
            Some(last) if current_ms >= last + self.target_interval_ms => {
                self.last_tick_ms = Some(current_ms);
                true
            }
            _ => false,
        }
    }

    /// Target interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.target_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = TickClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed_ms() < 1000.0); // less than 1 second
    }

    #[test]
    fn test_ms_secs_conversion() {
        assert!((TickClock::ms_to_secs(1500.0) - 1.5).abs() < 1e-9);
        assert!((TickClock::secs_to_ms(2.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_controller() {
        let mut ctrl = RateController::new(60);
        assert!(ctrl.should_tick(0.0)); // first tick always fires
        assert!(!ctrl.should_tick(1.0)); // 1ms later, too soon
        assert!(ctrl.should_tick(17.0)); // ~17ms later, should fire (60Hz ~ 16.67ms)
    }

    #[test]
    fn test_rate_controller_zero_hz_clamped() {
        let ctrl = RateController::new(0);
        assert!((ctrl.interval_ms() - 1000.0).abs() < 1e-9);
    }
}
