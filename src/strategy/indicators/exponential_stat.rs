//! Exponentially weighted mean and standard deviation.
//!
//! The first `window` observations fill a simple window; when it is full the
//! exponential state is seeded with that window's mean and population variance.
//! After seeding, with `alpha = 2 / (window + 1)`:
//!
//! ```text
//! delta = x - mean
//! mean  = mean + alpha * delta
//! var   = (1 - alpha) * (var + alpha * delta^2)
//! ```

use super::{RollingStat, StreamingStat};
use crate::strategy::error::SignalError;
use crate::strategy::params::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
struct EwState {
    mean: f64,
    variance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialStat {
    alpha: f64,
    seed: RollingStat,
    state: Option<EwState>,
}

impl ExponentialStat {
    pub fn new(window: usize) -> Result<Self, ConfigError> {
        let seed = RollingStat::new(window)?;
        Ok(Self {
            alpha: 2.0 / (window as f64 + 1.0),
            seed,
            state: None,
        })
    }

    pub fn update(&mut self, value: f64) {
        match self.state.as_mut() {
            Some(state) => {
                let delta = value - state.mean;
                state.mean += self.alpha * delta;
                state.variance = (1.0 - self.alpha) * (state.variance + self.alpha * delta * delta);
            }
            None => {
                self.seed.update(value);
                if let (Ok(mean), Ok(variance)) = (self.seed.mean(), self.seed.variance()) {
                    self.state = Some(EwState { mean, variance });
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn mean(&self) -> Result<f64, SignalError> {
        self.state
            .map(|s| s.mean)
            .ok_or(SignalError::NotReady("exponential statistic"))
    }

    pub fn stdev(&self) -> Result<f64, SignalError> {
        self.state
            .map(|s| s.variance.max(0.0).sqrt())
            .ok_or(SignalError::NotReady("exponential statistic"))
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn window(&self) -> usize {
        self.seed.window()
    }

    pub fn reset(&mut self) {
        self.seed.reset();
        self.state = None;
    }
}

impl StreamingStat for ExponentialStat {
    fn update(&mut self, value: f64) {
        ExponentialStat::update(self, value)
    }

    fn is_ready(&self) -> bool {
        ExponentialStat::is_ready(self)
    }

    fn mean(&self) -> Result<f64, SignalError> {
        ExponentialStat::mean(self)
    }

    fn stdev(&self) -> Result<f64, SignalError> {
        ExponentialStat::stdev(self)
    }

    fn window(&self) -> usize {
        ExponentialStat::window(self)
    }

    fn reset(&mut self) {
        ExponentialStat::reset(self)
    }
}
