use std::time::Duration;

use crate::config::Config;

/// Decides when the simulation should advance, given how much wall time has passed.
///
/// Elapsed time, scaled by `speed`, fills an accumulator. Once it reaches `interval` it is
/// emptied, and a generation is due if the simulation is running or a single step was asked for.
#[derive(Debug, Clone)]
pub struct Pacer {
    accum: f32,
    interval: f32,
    speed: f32,

    /// How much [`Pacer::slower`] and [`Pacer::faster`] change `interval`
    interval_delta: f32,
    max_interval: f32,

    paused: bool,
    step: bool,
}

impl Pacer {
    pub fn new(config: &Config) -> Self {
        Self {
            accum: 0.0,
            interval: config.step_interval,
            speed: config.speed,
            interval_delta: config.interval_delta,
            max_interval: config.max_interval,
            paused: config.start_paused,
            step: false,
        }
    }

    /// Feed `elapsed` wall time in, returns whether to advance one generation now.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.accum += (elapsed.as_secs_f32() * self.speed).abs();

        if self.accum < self.interval {
            return false;
        }

        self.accum = 0.0;

        if self.paused && !self.step {
            return false;
        }

        self.step = false;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Arms a single step. Asking again before it's taken disarms it.
    pub fn toggle_step(&mut self) {
        self.step = !self.step;
    }

    /// Lengthens the time between generations, up to the configured maximum.
    pub fn slower(&mut self) {
        if self.interval < self.max_interval {
            self.interval += self.interval_delta;
        }
    }

    /// Shortens the time between generations, down to one generation per frame.
    pub fn faster(&mut self) {
        if self.interval > 0.0 {
            self.interval = (self.interval - self.interval_delta).max(0.0);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}
