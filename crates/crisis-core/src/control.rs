//! Loop control: pause, speed and the fixed-step tick timer.

use bevy_ecs::prelude::*;
use std::time::Duration;

/// Slowest speed multiplier.
pub const MIN_SPEED: f32 = 0.25;
/// Fastest speed multiplier.
pub const MAX_SPEED: f32 = 2.0;
/// Increment used by speed up / speed down.
pub const SPEED_STEP: f32 = 0.25;
/// Ticks a single frame may catch up on after a stall.
pub const MAX_CATCH_UP: u32 = 4;

/// User-facing playback state
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LoopControl {
    pub paused: bool,
    speed: f32,
    base_interval: Duration,
}

impl LoopControl {
    pub fn new(base_interval: Duration) -> Self {
        Self {
            paused: false,
            speed: 1.0,
            base_interval,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Sets the speed, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.speed + SPEED_STEP);
    }

    pub fn speed_down(&mut self) {
        self.set_speed(self.speed - SPEED_STEP);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Wall-clock time per tick at the current speed.
    pub fn tick_interval(&self) -> Duration {
        self.base_interval.div_f32(self.speed)
    }

    /// Status text such as "1.25x" or "PAUSED".
    pub fn status_label(&self) -> String {
        if self.paused {
            "PAUSED".to_string()
        } else {
            format!("{:.2}x", self.speed)
        }
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

/// Converts frame time into whole ticks
#[derive(Resource, Debug, Clone, Default)]
pub struct TickTimer {
    accumulated: Duration,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` and returns the number of ticks now due.
    ///
    /// Nothing accumulates while paused. Backlog beyond [`MAX_CATCH_UP`]
    /// ticks is dropped.
    pub fn advance(&mut self, elapsed: Duration, control: &LoopControl) -> u32 {
        if control.paused {
            return 0;
        }
        let interval = control.tick_interval();
        if interval.is_zero() {
            return 0;
        }

        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= interval && due < MAX_CATCH_UP {
            self.accumulated -= interval;
            due += 1;
        }
        if due == MAX_CATCH_UP {
            self.accumulated = Duration::ZERO;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
